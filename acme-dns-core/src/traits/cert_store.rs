//! Certificate storage Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{CertificateBundle, CertificateExpiry};

/// Certificate store keyed by the exact domain set
#[async_trait]
pub trait CertStore: Send + Sync {
    /// Persist an issued certificate
    ///
    /// # Arguments
    /// * `bundle` - Issued certificate and key material
    /// * `domains` - Domain set the certificate was ordered for
    async fn store(&self, bundle: &CertificateBundle, domains: &[String]) -> CoreResult<()>;

    /// Expiry of the stored certificate, `None` if nothing is stored
    async fn load(&self, domains: &[String]) -> CoreResult<Option<CertificateExpiry>>;
}
