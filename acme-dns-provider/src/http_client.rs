//! Request execution with retries
//!
//! Providers sign and build their own `RequestBuilder`. This module sends it,
//! turns transport failures and throttling statuses into `ProviderError`s and
//! retries whatever [`ProviderError::is_retryable`] allows.

use std::time::Duration;

use reqwest::RequestBuilder;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// How many times and how long to wait between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    /// Retries after the first attempt; 0 sends exactly once
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Upper bound applied to a server supplied `Retry-After`
    pub max_retry_after: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            max_retry_after: Duration::from_secs(30),
        }
    }

    /// Wait before retry number `attempt + 1`
    pub fn delay_for(&self, error: &ProviderError, attempt: u32) -> Duration {
        if let ProviderError::RateLimited {
            retry_after: Some(secs),
            ..
        } = error
        {
            return Duration::from_secs(*secs).min(self.max_retry_after);
        }

        let factor = 1_u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    } else {
        ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: e.to_string(),
        }
    }
}

/// Statuses that say nothing about the request itself
fn status_error(
    provider: &str,
    status: u16,
    retry_after: Option<u64>,
    body: &str,
) -> Option<ProviderError> {
    match status {
        429 => Some(ProviderError::RateLimited {
            provider: provider.to_string(),
            retry_after,
            raw_message: Some(body.to_string()),
        }),
        502..=504 => Some(ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("HTTP {status}: {}", truncate_for_log(body)),
        }),
        _ => None,
    }
}

/// Send `request` once
pub(crate) async fn send(request: RequestBuilder, provider: &str) -> Result<HttpResponse> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(provider, &e))?;

    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;
    log::debug!("[{provider}] HTTP {status}: {}", truncate_for_log(&body));

    match status_error(provider, status, retry_after, &body) {
        Some(e) => Err(e),
        None => Ok(HttpResponse { status, body }),
    }
}

/// Send `request` until `accept` takes the response or the policy gives up.
///
/// `accept` turns an API-level failure into a `ProviderError`; retryable ones
/// (throttling reported in the body, for instance) go through the same backoff
/// as transport failures.
pub(crate) async fn send_with_retry<F>(
    request: RequestBuilder,
    provider: &str,
    policy: &RetryPolicy,
    accept: F,
) -> Result<HttpResponse>
where
    F: Fn(HttpResponse) -> Result<HttpResponse>,
{
    let mut attempt = 0;
    loop {
        let Some(this_try) = request.try_clone() else {
            log::warn!("[{provider}] Request body is not clonable, sending without retry");
            return send(request, provider).await.and_then(accept);
        };

        let error = match send(this_try, provider).await.and_then(&accept) {
            Ok(response) => return Ok(response),
            Err(e) if attempt < policy.max_retries && e.is_retryable() => e,
            Err(e) => return Err(e),
        };

        let delay = policy.delay_for(&error, attempt);
        attempt += 1;
        log::warn!(
            "[{provider}] Attempt {attempt}/{} failed, retrying in {:.1}s: {error}",
            policy.max_retries + 1,
            delay.as_secs_f32()
        );
        tokio::time::sleep(delay).await;
    }
}
