//! Certificate types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expiry of a stored certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateExpiry {
    pub not_after: DateTime<Utc>,
}

impl CertificateExpiry {
    pub fn new(not_after: DateTime<Utc>) -> Self {
        Self { not_after }
    }
}

/// One certificate order: a non-empty domain set and the account email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObtainRequest {
    pub domains: Vec<String>,
    pub email: String,
}

impl ObtainRequest {
    pub fn new(domains: Vec<String>, email: impl Into<String>) -> Self {
        Self {
            domains,
            email: email.into(),
        }
    }

    /// Domains joined for log lines and messages
    pub fn label(&self) -> String {
        self.domains.join(", ")
    }
}

/// Issued certificate as returned by the ACME client
///
/// All certificate and key material is PEM encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateBundle {
    /// Main domain of the certificate
    pub domain: String,
    pub cert_url: String,
    pub cert_stable_url: String,
    #[serde(skip)]
    pub certificate: String,
    #[serde(skip)]
    pub issuer_certificate: String,
    #[serde(skip)]
    pub private_key: Option<String>,
    #[serde(skip)]
    pub csr: Option<String>,
}
