//! Change propagation polling

use std::sync::Arc;
use std::time::Duration;

use acme_dns_provider::{ChangeStatus, DnsProvider};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Polling policy for [`PropagationWaiter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropagationConfig {
    /// Delay between two status polls
    pub interval: Duration,
    /// Number of polls before giving up
    pub max_attempts: u32,
    /// Return an error instead of proceeding when the ceiling is reached
    pub fail_on_timeout: bool,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 120,
            fail_on_timeout: false,
        }
    }
}

/// How a propagation wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    InSync { attempts: u32 },
    /// Ceiling reached under the soft-fail policy
    TimedOut { attempts: u32 },
}

/// Polls a submitted change until the provider reports it in sync
pub struct PropagationWaiter {
    provider: Arc<dyn DnsProvider>,
    config: PropagationConfig,
}

impl PropagationWaiter {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>, config: PropagationConfig) -> Self {
        Self { provider, config }
    }

    pub async fn wait_for_propagation(&self, change_id: &str) -> CoreResult<PropagationOutcome> {
        let max_attempts = self.config.max_attempts;
        let mut attempts = 0;

        while attempts < max_attempts {
            attempts += 1;
            let info = self.provider.get_change(change_id).await?;
            if info.status == ChangeStatus::InSync {
                log::debug!("Change {change_id} in sync after {attempts} attempt(s)");
                return Ok(PropagationOutcome::InSync { attempts });
            }
            if attempts < max_attempts {
                tokio::time::sleep(self.config.interval).await;
            }
        }

        if self.config.fail_on_timeout {
            return Err(CoreError::PropagationTimeout {
                change_id: change_id.to_string(),
                attempts,
            });
        }

        log::warn!(
            "Change {change_id} still pending after {attempts} attempts, proceeding anyway"
        );
        Ok(PropagationOutcome::TimedOut { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns01::RecordMutator;
    use crate::test_utils::MockDnsProvider;
    use acme_dns_provider::{ChangeAction, HostedZone, ProviderError};

    const FQDN: &str = "_acme-challenge.example.com.";

    async fn submit(dns: &Arc<MockDnsProvider>) -> String {
        RecordMutator::new(dns.clone())
            .change_record(ChangeAction::Upsert, FQDN, "v")
            .await
            .unwrap()
    }

    fn dns() -> Arc<MockDnsProvider> {
        Arc::new(MockDnsProvider::new(vec![HostedZone::new(
            "Z1",
            "example.com.",
            false,
        )]))
    }

    fn config(max_attempts: u32, fail_on_timeout: bool) -> PropagationConfig {
        PropagationConfig {
            interval: Duration::from_secs(1),
            max_attempts,
            fail_on_timeout,
        }
    }

    #[test]
    fn default_policy() {
        let config = PropagationConfig::default();
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.max_attempts, 120);
        assert!(!config.fail_on_timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_after_first_in_sync() {
        let dns = dns();
        dns.set_pending_polls(3);
        let id = submit(&dns).await;

        let waiter = PropagationWaiter::new(dns.clone(), config(10, false));
        let outcome = waiter.wait_for_propagation(&id).await.unwrap();

        assert_eq!(outcome, PropagationOutcome::InSync { attempts: 4 });
        assert_eq!(dns.get_change_calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn soft_fail_proceeds_after_ceiling() {
        let dns = dns();
        dns.stall(FQDN).await;
        let id = submit(&dns).await;

        let started = tokio::time::Instant::now();
        let waiter = PropagationWaiter::new(dns.clone(), config(5, false));
        let outcome = waiter.wait_for_propagation(&id).await.unwrap();

        assert_eq!(outcome, PropagationOutcome::TimedOut { attempts: 5 });
        assert_eq!(dns.get_change_calls(), 5);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn hard_fail_returns_timeout_error() {
        let dns = dns();
        dns.stall(FQDN).await;
        let id = submit(&dns).await;

        let waiter = PropagationWaiter::new(dns, config(3, true));
        let err = waiter.wait_for_propagation(&id).await.unwrap_err();

        assert!(
            matches!(&err, CoreError::PropagationTimeout { change_id, attempts: 3 } if *change_id == id),
            "unexpected: {err:?}"
        );
    }

    #[tokio::test]
    async fn polling_error_propagates() {
        let waiter = PropagationWaiter::new(dns(), config(3, false));
        let err = waiter.wait_for_propagation("CUNKNOWN").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::Provider(ProviderError::ChangeNotFound { .. })
        ));
    }
}
