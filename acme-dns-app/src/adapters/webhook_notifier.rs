//! Notifier posting to an HTTP webhook.
//!
//! The topic is the webhook URL; the body is `{"message": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use acme_dns_core::error::{CoreError, CoreResult};
use acme_dns_core::traits::Notifier;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ERROR_BODY: usize = 256;

#[derive(Serialize)]
struct WebhookPayload<'a> {
    message: &'a str,
}

/// Webhook [`Notifier`]
pub struct WebhookNotifier {
    client: Client,
}

impl WebhookNotifier {
    pub fn new() -> CoreResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| CoreError::Notify(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Use a preconfigured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, topic: &str, message: &str) -> CoreResult<()> {
        let response = self
            .client
            .post(topic)
            .json(&WebhookPayload { message })
            .send()
            .await
            .map_err(|e| CoreError::Notify(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(CoreError::Notify(format!("HTTP {status}: {body}")));
        }

        log::debug!("Webhook notified ({status})");
        Ok(())
    }
}
