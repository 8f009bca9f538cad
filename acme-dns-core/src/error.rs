//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use acme_dns_provider::{ChangeAction, ProviderError};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// No public hosted zone is an ancestor of the domain
    #[error("No hosted zone found for domain: {0}")]
    ZoneNotFound(String),

    /// A TXT record mutation was rejected by the provider
    #[error("Failed to {action} record {fqdn} in zone {zone_id}: {source}")]
    DnsChange {
        zone_id: String,
        fqdn: String,
        action: ChangeAction,
        source: ProviderError,
    },

    /// Change did not reach `INSYNC` within the attempt ceiling
    #[error("Change {change_id} not in sync after {attempts} attempts")]
    PropagationTimeout { change_id: String, attempts: u32 },

    /// ACME account registration failed
    #[error("Registration error: {0}")]
    Registration(String),

    /// Certificate issuance failed
    #[error("Obtain error: {0}")]
    Obtain(String),

    /// Certificate store error
    #[error("Certificate store error: {0}")]
    Store(String),

    /// ACME client could not be constructed
    #[error("ACME client configuration error: {0}")]
    AcmeConfig(String),

    /// Notification could not be delivered
    #[error("Notification error: {0}")]
    Notify(String),

    /// Account key could not be written
    #[error("Failed to persist account key: {0}")]
    PersistKey(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The run deadline passed before the task finished
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, missing zone, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ZoneNotFound(_) | Self::Validation(_) => true,
            Self::DnsChange { source, .. } | Self::Provider(source) => source.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
