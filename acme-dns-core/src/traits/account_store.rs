//! ACME account persistence Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::StoredAccount;

/// Account store keyed by email
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get the account of `email`
    async fn load(&self, email: &str) -> CoreResult<Option<StoredAccount>>;

    /// Save account (new or update)
    async fn save(&self, account: &StoredAccount) -> CoreResult<()>;
}
