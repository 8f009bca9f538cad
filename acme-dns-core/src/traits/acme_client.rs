//! ACME client abstraction

use std::sync::Arc;

use async_trait::async_trait;

use super::ChallengeProvider;
use crate::error::CoreResult;
use crate::types::{
    AcmeClientConfig, CertificateBundle, CertificateRequest, RegisterOptions, Registration,
};

/// Builds one ACME client per certificate task
pub trait AcmeClientFactory: Send + Sync {
    /// Create a client bound to a directory and user
    ///
    /// # Arguments
    /// * `config` - Directory URL, certificate key type and ACME user
    fn create(&self, config: &AcmeClientConfig) -> CoreResult<Box<dyn AcmeClient>>;
}

/// ACME protocol client
///
/// Contract: cleanup failures reported by the challenge provider are logged by
/// the client and never fail an otherwise successful `obtain`.
#[async_trait]
pub trait AcmeClient: Send + Sync {
    /// Route DNS-01 challenges to `provider`
    fn set_challenge_provider(&mut self, provider: Arc<dyn ChallengeProvider>) -> CoreResult<()>;

    /// Create the account of the configured user
    async fn register(&self, options: &RegisterOptions) -> CoreResult<Registration>;

    /// Order, validate and download a certificate
    async fn obtain(&self, request: &CertificateRequest) -> CoreResult<CertificateBundle>;
}
