//! ACME account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Registration resource returned by the CA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Account URL (`Location` header of the new-account response)
    pub uri: String,
    /// Account status reported by the CA (`valid`, `deactivated`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// ACME user handed to the ACME client
///
/// Owns its account private key (PKCS#8 PEM).
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub email: String,
    pub registration: Option<Registration>,
    pub private_key_pem: String,
}

impl UserAccount {
    /// Create a user with a freshly generated ECDSA P-256 account key
    pub fn generate(email: impl Into<String>) -> CoreResult<Self> {
        let key = rcgen::KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256)
            .map_err(|e| CoreError::AcmeConfig(format!("account key generation failed: {e}")))?;

        Ok(Self {
            email: email.into(),
            registration: None,
            private_key_pem: key.serialize_pem(),
        })
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }
}

/// Persisted form of a [`UserAccount`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccount {
    pub email: String,
    pub private_key_pem: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration: Option<Registration>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredAccount {
    /// Snapshot a user, keeping the creation time of an earlier snapshot if any
    pub fn from_user(user: &UserAccount, previous: Option<&Self>) -> Self {
        let now = Utc::now();
        Self {
            email: user.email.clone(),
            private_key_pem: user.private_key_pem.clone(),
            registration: user.registration.clone(),
            created_at: previous.map_or(now, |p| p.created_at),
            updated_at: now,
        }
    }
}

impl From<StoredAccount> for UserAccount {
    fn from(stored: StoredAccount) -> Self {
        Self {
            email: stored.email,
            registration: stored.registration,
            private_key_pem: stored.private_key_pem,
        }
    }
}
