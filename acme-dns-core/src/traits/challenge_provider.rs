//! Challenge provider Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Fulfils ACME challenges on behalf of an [`AcmeClient`](super::AcmeClient)
///
/// The client calls `present` for each authorization before asking the CA to
/// validate it, and `clean_up` afterwards whatever the outcome.
#[async_trait]
pub trait ChallengeProvider: Send + Sync {
    /// Make the challenge for `domain` answerable
    ///
    /// # Arguments
    /// * `domain` - Identifier being authorized (may start with `*.`)
    /// * `token` - Challenge token
    /// * `key_auth` - Key authorization (`token.thumbprint`)
    async fn present(&self, domain: &str, token: &str, key_auth: &str) -> CoreResult<()>;

    /// Remove whatever `present` published. Must be idempotent.
    async fn clean_up(&self, domain: &str, token: &str, key_auth: &str) -> CoreResult<()>;
}
