//! Application bootstrap for ACME DNS-01 certificate issuance.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter
//! injection). The ACME protocol client is always supplied by the host; every
//! other collaborator has a default adapter from [`adapters`].

pub mod adapters;

use std::sync::Arc;

use acme_dns_core::error::{CoreError, CoreResult};
use acme_dns_core::services::{CertificateService, ServiceContext};
use acme_dns_core::traits::{AccountStore, AcmeClientFactory, CertStore, Notifier};
use acme_dns_core::types::{ObtainOutcome, RunSummary};
use acme_dns_core::OrchestratorConfig;
use acme_dns_provider::{create_provider, DnsProvider, ProviderCredentials};

use adapters::{FileAccountStore, FileCertStore, WebhookNotifier};

/// Application state.
///
/// Built once at startup via `AppStateBuilder` and shared by every task of a run.
pub struct AppState {
    /// Service context (holds all adapters)
    pub ctx: Arc<ServiceContext>,
    /// Configuration of the run
    pub config: Arc<OrchestratorConfig>,
    /// Certificate service
    pub certificate_service: CertificateService,
}

impl AppState {
    /// Validate the configuration and process every configured domain.
    ///
    /// Per-domain failures are reported in the summary, not as an error.
    pub async fn run(&self) -> CoreResult<RunSummary> {
        self.config.validate()?;

        log::info!(
            "Processing {} domain(s) for {} against {}",
            self.config.domains.len(),
            self.config.email,
            self.config.directory_url()
        );

        let summary = self
            .certificate_service
            .obtain_each(&self.config.domains, &self.config.email)
            .await;

        for report in &summary.reports {
            match &report.result {
                Ok(ObtainOutcome::Issued { warnings }) if warnings.is_empty() => {
                    log::info!("[{}] issued", report.domain);
                }
                Ok(ObtainOutcome::Issued { warnings }) => {
                    log::warn!("[{}] issued with {} warning(s)", report.domain, warnings.len());
                }
                Ok(ObtainOutcome::Skipped { remaining_days }) => {
                    log::info!("[{}] skipped, {remaining_days} days left", report.domain);
                }
                Err(e) => log::error!("[{}] failed at {}: {}", report.domain, e.stage, e.source),
            }
        }

        Ok(summary)
    }
}

/// Builder for constructing `AppState` with host-specific adapters.
///
/// # Required adapters
/// - `acme_client_factory`: the ACME protocol client
///
/// # Optional
/// - `config`: defaults to `OrchestratorConfig::from_env()`
/// - `dns_provider`: defaults to Route53 with credentials from the environment
/// - `cert_store`: defaults to `FileCertStore` under `{config_dir}/certificates`
/// - `notifier`: defaults to `WebhookNotifier`
/// - `account_store`: defaults to `FileAccountStore` under `{config_dir}/accounts`
pub struct AppStateBuilder {
    config: Option<OrchestratorConfig>,
    acme_client_factory: Option<Arc<dyn AcmeClientFactory>>,
    dns_provider: Option<Arc<dyn DnsProvider>>,
    cert_store: Option<Arc<dyn CertStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    account_store: Option<Arc<dyn AccountStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            acme_client_factory: None,
            dns_provider: None,
            cert_store: None,
            notifier: None,
            account_store: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: OrchestratorConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn acme_client_factory(mut self, factory: Arc<dyn AcmeClientFactory>) -> Self {
        self.acme_client_factory = Some(factory);
        self
    }

    #[must_use]
    pub fn dns_provider(mut self, provider: Arc<dyn DnsProvider>) -> Self {
        self.dns_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn cert_store(mut self, store: Arc<dyn CertStore>) -> Self {
        self.cert_store = Some(store);
        self
    }

    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    #[must_use]
    pub fn account_store(mut self, store: Arc<dyn AccountStore>) -> Self {
        self.account_store = Some(store);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if required adapters are missing or the
    /// default DNS provider cannot find its credentials.
    pub fn build(self) -> CoreResult<AppState> {
        let acme_client_factory = self.acme_client_factory.ok_or_else(|| {
            CoreError::Validation("acme_client_factory is required".to_string())
        })?;
        let config = self.config.unwrap_or_else(OrchestratorConfig::from_env);

        let dns_provider = match self.dns_provider {
            Some(provider) => provider,
            None => {
                let credentials = ProviderCredentials::from_env()
                    .map_err(|e| CoreError::Validation(e.to_string()))?;
                create_provider(credentials)?
            }
        };
        let cert_store = self.cert_store.unwrap_or_else(|| {
            Arc::new(FileCertStore::new(config.config_dir.join("certificates")))
        });
        let notifier = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(WebhookNotifier::new()?),
        };
        let account_store = self.account_store.unwrap_or_else(|| {
            Arc::new(FileAccountStore::new(config.config_dir.join("accounts")))
        });

        let ctx = Arc::new(ServiceContext::new(
            dns_provider,
            acme_client_factory,
            cert_store,
            notifier,
            account_store,
        ));
        let config = Arc::new(config);
        let certificate_service = CertificateService::new(Arc::clone(&ctx), Arc::clone(&config));

        Ok(AppState {
            ctx,
            config,
            certificate_service,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
