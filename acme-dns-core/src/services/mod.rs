//! Business logic service layer

mod account_service;
mod certificate_service;

pub use account_service::AccountService;
pub use certificate_service::CertificateService;

use std::sync::Arc;

use acme_dns_provider::DnsProvider;

use crate::traits::{AccountStore, AcmeClientFactory, CertStore, Notifier};

/// Service context - holds all dependencies
///
/// The host builds this once at startup and injects its adapters.
pub struct ServiceContext {
    /// DNS provider hosting the challenge records
    pub dns_provider: Arc<dyn DnsProvider>,
    /// ACME client factory
    pub acme_client_factory: Arc<dyn AcmeClientFactory>,
    /// Certificate store
    pub cert_store: Arc<dyn CertStore>,
    /// Notification sink
    pub notifier: Arc<dyn Notifier>,
    /// ACME account persistence
    pub account_store: Arc<dyn AccountStore>,
}

impl ServiceContext {
    /// Create service context
    #[must_use]
    pub fn new(
        dns_provider: Arc<dyn DnsProvider>,
        acme_client_factory: Arc<dyn AcmeClientFactory>,
        cert_store: Arc<dyn CertStore>,
        notifier: Arc<dyn Notifier>,
        account_store: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            dns_provider,
            acme_client_factory,
            cert_store,
            notifier,
            account_store,
        }
    }
}
