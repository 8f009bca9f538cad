use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{ChangeInfo, HostedZone, RecordSetChange};

/// Raw API error (internal)
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// Error code (format differs per provider)
    pub code: Option<String>,
    /// Original error message
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Extra context used when mapping errors (internal)
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Record name (for `RecordNotFound`)
    pub record_name: Option<String>,
    /// Zone id (for `ZoneNotFound`)
    pub zone_id: Option<String>,
    /// Change id (for `ChangeNotFound`)
    pub change_id: Option<String>,
}

/// Maps raw provider API errors onto [`ProviderError`] (internal)
pub(crate) trait ProviderErrorMapper {
    /// Provider identifier
    fn provider_name(&self) -> &'static str;

    /// Map a raw API error to the unified error type
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shortcut: parse error
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Shortcut: unknown error (fallback)
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// DNS provider able to host ACME DNS-01 challenge records.
///
/// Implementations hold no per-call mutable state, so one instance can be
/// shared across concurrent tasks behind an `Arc`.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Provider identifier
    fn id(&self) -> &'static str;

    /// Check the credentials against the remote API.
    ///
    /// Returns `Ok(false)` when the API rejects the credentials.
    async fn validate_credentials(&self) -> Result<bool>;

    /// List every hosted zone visible to the account, following pagination.
    async fn list_zones(&self) -> Result<Vec<HostedZone>>;

    /// Submit a record set mutation to a zone.
    ///
    /// # Arguments
    /// * `zone_id` - Hosted zone identifier
    /// * `change` - Record set mutation
    async fn change_record_set(&self, zone_id: &str, change: &RecordSetChange)
    -> Result<ChangeInfo>;

    /// Fetch the current propagation status of a submitted change.
    ///
    /// # Arguments
    /// * `change_id` - Identifier returned by [`change_record_set`](Self::change_record_set)
    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo>;
}
