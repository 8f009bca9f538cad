//! Provider factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::Route53Provider;
use crate::traits::DnsProvider;
use crate::types::ProviderCredentials;

/// Creates a [`DnsProvider`] instance from the given credentials.
///
/// The concrete provider type is determined by the [`ProviderCredentials`] variant.
/// The returned provider is wrapped in `Arc<dyn DnsProvider>` so it can be shared
/// by concurrently running challenge tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use acme_dns_provider::{create_provider, ProviderCredentials};
///
/// let provider = create_provider(ProviderCredentials::Route53 {
///     access_key_id: "AKID...".to_string(),
///     secret_access_key: "secret".to_string(),
///     session_token: None,
/// });
/// ```
pub fn create_provider(credentials: ProviderCredentials) -> Result<Arc<dyn DnsProvider>> {
    match credentials {
        ProviderCredentials::Route53 {
            access_key_id,
            secret_access_key,
            session_token,
        } => Ok(Arc::new(Route53Provider::new(
            access_key_id,
            secret_access_key,
            session_token,
        )?)),
    }
}
