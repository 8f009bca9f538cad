//! AWS Route53 DNS Provider

mod error;
mod http;
mod provider;
mod sign;
/// Route53 REST/XML request and response types.
pub(crate) mod types;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::RetryPolicy;
use crate::providers::common::create_http_client;

use sign::Signer;

/// Route53 API host (global endpoint).
pub(crate) const ROUTE53_HOST: &str = "route53.amazonaws.com";
/// Route53 API version path segment.
pub(crate) const ROUTE53_API_VERSION: &str = "2013-04-01";
/// Route53 XML namespace for request bodies.
pub(crate) const ROUTE53_XMLNS: &str = "https://route53.amazonaws.com/doc/2013-04-01/";
/// Signing region of the global Route53 endpoint.
pub(crate) const ROUTE53_SIGNING_REGION: &str = "us-east-1";
/// Signing service name.
pub(crate) const ROUTE53_SIGNING_SERVICE: &str = "route53";
/// Page size used when listing hosted zones.
pub(crate) const MAX_ZONES_PER_PAGE: u32 = 100;

/// AWS Route53 provider implementation.
///
/// Authenticates via AWS Signature Version 4.
///
/// # Construction
///
/// ```rust,no_run
/// use acme_dns_provider::Route53Provider;
///
/// # fn main() -> acme_dns_provider::Result<()> {
/// let provider = Route53Provider::new(
///     "your-access-key-id".to_string(),
///     "your-secret-access-key".to_string(),
///     None,
/// )?;
/// # Ok(())
/// # }
/// ```
pub struct Route53Provider {
    pub(crate) client: Client,
    pub(crate) signer: Signer,
    pub(crate) retry: RetryPolicy,
}

/// Builder for [`Route53Provider`] with configurable retry behavior.
pub struct Route53ProviderBuilder {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    max_retries: u32,
}

impl Route53ProviderBuilder {
    fn new(
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    ) -> Self {
        Self {
            access_key_id,
            secret_access_key,
            session_token,
            max_retries: 2,
        }
    }

    /// Set the maximum number of automatic retries for transient errors (default: 2).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`Route53Provider`] instance.
    pub fn build(self) -> Result<Route53Provider> {
        Ok(Route53Provider {
            client: create_http_client(ROUTE53_SIGNING_SERVICE)?,
            signer: Signer {
                access_key_id: self.access_key_id,
                secret_access_key: self.secret_access_key,
                session_token: self.session_token,
                region: ROUTE53_SIGNING_REGION.to_string(),
                service: ROUTE53_SIGNING_SERVICE.to_string(),
            },
            retry: RetryPolicy::new(self.max_retries),
        })
    }
}

impl Route53Provider {
    /// Creates a new Route53 provider with default settings (2 retries).
    pub fn new(
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    ) -> Result<Self> {
        Self::builder(access_key_id, secret_access_key, session_token).build()
    }

    /// Returns a builder for customizing the provider configuration.
    pub fn builder(
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    ) -> Route53ProviderBuilder {
        Route53ProviderBuilder::new(access_key_id, secret_access_key, session_token)
    }
}
