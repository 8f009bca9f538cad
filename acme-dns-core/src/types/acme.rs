//! ACME client configuration and request types

use serde::{Deserialize, Serialize};

use super::account::UserAccount;

/// Let's Encrypt production directory
pub const LETSENCRYPT_PRODUCTION_DIRECTORY: &str =
    "https://acme-v02.api.letsencrypt.org/directory";
/// Let's Encrypt staging directory
pub const LETSENCRYPT_STAGING_DIRECTORY: &str =
    "https://acme-staging-v02.api.letsencrypt.org/directory";

/// Certificate key algorithm requested from the ACME client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "EC256")]
    Ec256,
    #[serde(rename = "EC384")]
    Ec384,
    #[default]
    #[serde(rename = "RSA2048")]
    Rsa2048,
    #[serde(rename = "RSA4096")]
    Rsa4096,
    #[serde(rename = "RSA8192")]
    Rsa8192,
}

/// Everything an ACME client needs to be constructed
#[derive(Debug, Clone)]
pub struct AcmeClientConfig {
    pub directory_url: String,
    pub key_type: KeyType,
    pub user: UserAccount,
}

/// Options of the new-account request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOptions {
    pub terms_of_service_agreed: bool,
}

/// Certificate order submitted to the ACME client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    pub domains: Vec<String>,
    /// Append the issuer certificate to the leaf
    pub bundle: bool,
    pub must_staple: bool,
}
