//! # acme-dns-provider
//!
//! DNS provider abstraction used to publish ACME DNS-01 challenge records.
//!
//! ## Supported Providers
//!
//! | Provider | Auth Method |
//! |----------|-------------|
//! | [AWS Route53](https://aws.amazon.com/route53/) | AWS Signature Version 4 |
//!
//! ## Feature Flags
//!
//! - **`rustls`** *(default)*: Use rustls for TLS.
//! - **`native-tls`**: Use the platform's native TLS implementation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use acme_dns_provider::{
//!     create_provider, ChangeAction, ChangeStatus, DnsProvider, ProviderCredentials,
//!     RecordSetChange,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider from the standard AWS environment variables
//!     let provider = create_provider(ProviderCredentials::from_env()?)?;
//!
//!     // 2. List hosted zones
//!     let zones = provider.list_zones().await?;
//!     let zone = &zones[0];
//!
//!     // 3. Publish a TXT record and wait until it is in sync
//!     let change = RecordSetChange {
//!         action: ChangeAction::Upsert,
//!         name: format!("_acme-challenge.{}", zone.name),
//!         record_type: "TXT".to_string(),
//!         ttl: 60,
//!         values: vec!["\"token\"".to_string()],
//!         comment: None,
//!     };
//!     let mut info = provider.change_record_set(&zone.id, &change).await?;
//!     while info.status != ChangeStatus::InSync {
//!         tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!         info = provider.get_change(&info.id).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//!
//! - [`ProviderError::InvalidCredentials`]: authentication failed
//! - [`ProviderError::RecordNotFound`]: deleting a record set that does not exist
//! - [`ProviderError::RateLimited`]: API rate limit exceeded (retryable)
//! - [`ProviderError::NetworkError`]: network connectivity issue (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are automatically
//! retried with exponential backoff. See [`ProviderError`] for the full list.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export factory functions
pub use factory::create_provider;

// Re-export core trait only (internal traits are not exported)
pub use traits::DnsProvider;

// Re-export types
pub use types::{
    AWS_ACCESS_KEY_ID_ENV, AWS_SECRET_ACCESS_KEY_ENV, AWS_SESSION_TOKEN_ENV, ChangeAction,
    ChangeInfo, ChangeStatus, CredentialValidationError, HostedZone, ProviderCredentials,
    RecordSetChange,
};

// Re-export concrete providers
pub use providers::{Route53Provider, Route53ProviderBuilder};
