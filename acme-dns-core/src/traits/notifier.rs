//! Notification sink Trait

use async_trait::async_trait;

use crate::error::CoreResult;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message` to `topic`
    async fn notify(&self, topic: &str, message: &str) -> CoreResult<()>;
}
