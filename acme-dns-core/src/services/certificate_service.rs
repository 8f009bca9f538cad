//! Certificate lifecycle service

use std::future::Future;
use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;

use crate::config::OrchestratorConfig;
use crate::dns01::DnsChallengeProvider;
use crate::error::{CoreError, CoreResult};
use crate::renewal::{should_renew, RenewalDecision};
use crate::services::{AccountService, ServiceContext};
use crate::types::{
    AcmeClientConfig, CertificateRequest, DomainReport, ObtainOutcome, ObtainRequest,
    RegisterOptions, RunSummary, Stage, StageWarning, TaskError,
};

/// Run `fut`, failing with `DeadlineExceeded` once `deadline` has passed
async fn with_deadline<T>(
    deadline: Option<Instant>,
    fut: impl Future<Output = CoreResult<T>>,
) -> CoreResult<T> {
    match deadline {
        Some(at) => tokio::time::timeout_at(at, fut)
            .await
            .unwrap_or(Err(CoreError::DeadlineExceeded)),
        None => fut.await,
    }
}

/// Drives issuance and renewal of certificates
pub struct CertificateService {
    ctx: Arc<ServiceContext>,
    config: Arc<OrchestratorConfig>,
    accounts: AccountService,
}

impl CertificateService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, config: Arc<OrchestratorConfig>) -> Self {
        let accounts = AccountService::new(ctx.clone(), config.clone());
        Self {
            ctx,
            config,
            accounts,
        }
    }

    fn run_deadline(&self) -> Option<Instant> {
        self.config.deadline.map(|budget| Instant::now() + budget)
    }

    /// Issue or renew the certificate of one domain set
    pub async fn obtain(&self, request: &ObtainRequest) -> Result<ObtainOutcome, TaskError> {
        self.obtain_until(request, self.run_deadline()).await
    }

    /// Run one [`obtain`](Self::obtain) per domain concurrently.
    ///
    /// All tasks share one deadline. A failing domain never affects the others.
    pub async fn obtain_each(&self, domains: &[String], email: &str) -> RunSummary {
        let deadline = self.run_deadline();

        let tasks: Vec<_> = domains
            .iter()
            .map(|domain| async move {
                let request = ObtainRequest::new(vec![domain.clone()], email);
                let result = self.obtain_until(&request, deadline).await;
                if let Err(e) = &result {
                    if e.source.is_expected() {
                        log::warn!("{e}");
                    } else {
                        log::error!("{e}");
                    }
                }
                DomainReport {
                    domain: domain.clone(),
                    result,
                }
            })
            .collect();

        let summary = RunSummary::from_reports(futures::future::join_all(tasks).await);
        log::info!(
            "Run finished: {} issued, {} skipped, {} failed",
            summary.success_count,
            summary.skipped_count,
            summary.failed_count
        );
        summary
    }

    async fn obtain_until(
        &self,
        request: &ObtainRequest,
        deadline: Option<Instant>,
    ) -> Result<ObtainOutcome, TaskError> {
        let label = request.label();
        let domains = request.domains.as_slice();
        let fail = |stage: Stage| move |source: CoreError| TaskError::new(domains, stage, source);
        let mut warnings = Vec::new();

        if domains.is_empty() {
            return Err(fail(Stage::DecideRenewal)(CoreError::Validation(
                "domains list must not be empty".to_string(),
            )));
        }

        // ===== Decide renewal =====
        let existing = with_deadline(deadline, self.ctx.cert_store.load(domains))
            .await
            .map_err(fail(Stage::DecideRenewal))?;

        match should_renew(existing.as_ref(), self.config.renew_before_days, Utc::now()) {
            RenewalDecision::Skip { remaining_hours } => {
                let remaining_days = remaining_hours / 24;
                log::info!(
                    "[{label}] Certificate valid for {remaining_days} more days, skipping renewal"
                );
                return Ok(ObtainOutcome::Skipped { remaining_days });
            }
            RenewalDecision::Renew { remaining_hours } => {
                log::info!(
                    "[{label}] Certificate expires in {} days, renewing",
                    remaining_hours / 24
                );
            }
            RenewalDecision::NoCertificate => {
                log::info!("[{label}] No certificate found, issuing a new one");
            }
        }

        // ===== User and client =====
        let mut user = with_deadline(deadline, self.accounts.load_user(&request.email))
            .await
            .map_err(fail(Stage::LoadUser))?;

        let client_config = AcmeClientConfig {
            directory_url: self.config.directory_url().to_string(),
            key_type: self.config.key_type,
            user: user.clone(),
        };
        let challenge = Arc::new(DnsChallengeProvider::new(
            self.ctx.dns_provider.clone(),
            self.config.propagation.clone(),
        ));
        let client = with_deadline(deadline, async {
            let mut client = self.ctx.acme_client_factory.create(&client_config)?;
            client.set_challenge_provider(challenge)?;
            Ok::<_, CoreError>(client)
        })
        .await
        .map_err(fail(Stage::BuildConfig))?;

        // ===== Registration =====
        if user.is_registered() {
            log::debug!("[{label}] Account of {} already registered", user.email);
        } else {
            let options = RegisterOptions {
                terms_of_service_agreed: true,
            };
            let registration = with_deadline(deadline, client.register(&options))
                .await
                .map_err(fail(Stage::RegisterAccount))?;
            log::info!("[{label}] Registered ACME account {}", registration.uri);
            user.registration = Some(registration);

            if self.config.reuse_account {
                match with_deadline(deadline, self.accounts.save_user(&user)).await {
                    Ok(()) => {}
                    Err(CoreError::DeadlineExceeded) => {
                        return Err(fail(Stage::RegisterAccount)(CoreError::DeadlineExceeded));
                    }
                    Err(e) => {
                        log::warn!("[{label}] Failed to save account registration: {e}");
                        warnings.push(StageWarning {
                            stage: Stage::RegisterAccount,
                            message: e.to_string(),
                        });
                    }
                }
            }
        }

        // ===== Issuance =====
        let certificate_request = CertificateRequest {
            domains: domains.to_vec(),
            bundle: false,
            must_staple: false,
        };
        let bundle = with_deadline(deadline, client.obtain(&certificate_request))
            .await
            .map_err(fail(Stage::ObtainCertificate))?;

        with_deadline(deadline, self.ctx.cert_store.store(&bundle, domains))
            .await
            .map_err(fail(Stage::StoreCertificate))?;
        log::info!("[{label}] Certificate stored");

        // ===== Best-effort stages =====
        // The certificate is stored: failures below, the deadline included, are warnings
        if let Some(topic) = self.config.topic.as_deref() {
            let message = format!(
                "Certificates for the following domains successfully obtained: {label}"
            );
            match with_deadline(deadline, self.ctx.notifier.notify(topic, &message)).await {
                Ok(()) => log::debug!("[{label}] Notification sent to {topic}"),
                Err(e) => {
                    log::warn!("[{label}] Notification failed: {e}");
                    warnings.push(StageWarning {
                        stage: Stage::Notify,
                        message: e.to_string(),
                    });
                }
            }
        }

        match with_deadline(deadline, self.accounts.persist_key(&user)).await {
            Ok(_) => {}
            Err(e) => {
                log::warn!("[{label}] Failed to persist account key: {e}");
                warnings.push(StageWarning {
                    stage: Stage::PersistUserKey,
                    message: e.to_string(),
                });
            }
        }

        Ok(ObtainOutcome::Issued { warnings })
    }
}
