//! DNS-01 challenge provider

use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use acme_dns_provider::{ChangeAction, DnsProvider, ProviderError};

use super::propagation::{PropagationConfig, PropagationOutcome, PropagationWaiter};
use super::record::RecordMutator;
use crate::error::{CoreError, CoreResult};
use crate::traits::ChallengeProvider;

const CHALLENGE_LABEL: &str = "_acme-challenge";

/// `_acme-challenge.<domain>.` with a leading wildcard label removed
pub fn challenge_record_fqdn(domain: &str) -> String {
    let domain = domain.strip_prefix("*.").unwrap_or(domain);
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    format!("{CHALLENGE_LABEL}.{domain}.")
}

/// base64url (no padding) of the SHA-256 digest of the key authorization
pub fn challenge_record_value(key_auth: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(key_auth.as_bytes()))
}

/// Publishes challenge TXT records through a [`DnsProvider`]
pub struct DnsChallengeProvider {
    mutator: RecordMutator,
    waiter: PropagationWaiter,
}

impl DnsChallengeProvider {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>, propagation: PropagationConfig) -> Self {
        Self {
            mutator: RecordMutator::new(provider.clone()),
            waiter: PropagationWaiter::new(provider, propagation),
        }
    }
}

#[async_trait]
impl ChallengeProvider for DnsChallengeProvider {
    async fn present(&self, domain: &str, _token: &str, key_auth: &str) -> CoreResult<()> {
        let fqdn = challenge_record_fqdn(domain);
        let value = challenge_record_value(key_auth);

        log::info!("[{domain}] Presenting DNS-01 challenge at {fqdn}");
        let change_id = self
            .mutator
            .change_record(ChangeAction::Upsert, &fqdn, &value)
            .await?;

        if let PropagationOutcome::InSync { attempts } =
            self.waiter.wait_for_propagation(&change_id).await?
        {
            log::info!("[{domain}] Challenge record in sync after {attempts} poll(s)");
        }
        Ok(())
    }

    async fn clean_up(&self, domain: &str, _token: &str, key_auth: &str) -> CoreResult<()> {
        let fqdn = challenge_record_fqdn(domain);
        let value = challenge_record_value(key_auth);

        match self
            .mutator
            .change_record(ChangeAction::Delete, &fqdn, &value)
            .await
        {
            Ok(_) => {
                log::info!("[{domain}] Removed challenge record {fqdn}");
                Ok(())
            }
            Err(CoreError::DnsChange {
                source: ProviderError::RecordNotFound { .. },
                ..
            }) => {
                log::debug!("[{domain}] Challenge record {fqdn} already absent");
                Ok(())
            }
            Err(e) => {
                log::warn!("[{domain}] Failed to clean up {fqdn}: {e}");
                Err(e)
            }
        }
    }
}
