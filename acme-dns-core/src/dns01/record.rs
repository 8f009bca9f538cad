//! TXT record mutation against the authoritative zone

use std::sync::Arc;

use acme_dns_provider::{ChangeAction, DnsProvider, RecordSetChange};

use super::zone::resolve_zone;
use crate::error::{CoreError, CoreResult};

/// TTL of challenge records, in seconds
pub const CHALLENGE_TTL: u32 = 60;

const TXT: &str = "TXT";

/// Wrap a TXT value in double quotes, exactly once. No escaping is applied.
pub fn quote_txt_value(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value.to_string()
    } else {
        format!("\"{value}\"")
    }
}

/// Applies single-value TXT changes to whichever zone owns the record
pub struct RecordMutator {
    provider: Arc<dyn DnsProvider>,
}

impl RecordMutator {
    #[must_use]
    pub fn new(provider: Arc<dyn DnsProvider>) -> Self {
        Self { provider }
    }

    /// Upsert or delete the TXT record `fqdn` holding `value`.
    ///
    /// Zones are listed again on every call. Returns the provider's change id.
    pub async fn change_record(
        &self,
        action: ChangeAction,
        fqdn: &str,
        value: &str,
    ) -> CoreResult<String> {
        let zones = self.provider.list_zones().await?;
        let zone_id = resolve_zone(fqdn, &zones)?;

        let change = RecordSetChange {
            action,
            name: fqdn.to_string(),
            record_type: TXT.to_string(),
            ttl: CHALLENGE_TTL,
            values: vec![quote_txt_value(value)],
            comment: Some(format!(
                "acme-dns certificate validation, action = {action} and domain = {fqdn}"
            )),
        };

        match self.provider.change_record_set(&zone_id, &change).await {
            Ok(info) => {
                log::info!(
                    "[{}] {action} {fqdn} in zone {zone_id}: change {}",
                    self.provider.id(),
                    info.id
                );
                Ok(info.id)
            }
            Err(source) => Err(CoreError::DnsChange {
                zone_id,
                fqdn: fqdn.to_string(),
                action,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_error, MockDnsProvider};
    use acme_dns_provider::{HostedZone, ProviderError};

    const FQDN: &str = "_acme-challenge.www.example.com.";

    fn provider() -> Arc<MockDnsProvider> {
        Arc::new(MockDnsProvider::new(vec![
            HostedZone::new("ZROOT", "example.com.", false),
            HostedZone::new("ZOTHER", "example.org.", false),
        ]))
    }

    #[test]
    fn quoting_wraps_exactly_once() {
        assert_eq!(quote_txt_value("abc"), "\"abc\"");
        assert_eq!(quote_txt_value("\"abc\""), "\"abc\"");
        assert_eq!(quote_txt_value(&quote_txt_value("abc")), "\"abc\"");
        assert_eq!(quote_txt_value("\""), "\"\"\"");
        assert_eq!(quote_txt_value(""), "\"\"");
    }

    #[tokio::test]
    async fn upsert_builds_txt_change_in_resolved_zone() {
        let dns = provider();
        let mutator = RecordMutator::new(dns.clone());

        let id = mutator
            .change_record(ChangeAction::Upsert, FQDN, "token")
            .await
            .unwrap();
        assert!(!id.is_empty());

        let submitted = dns.submitted().await;
        assert_eq!(submitted.len(), 1);
        let (zone_id, change) = &submitted[0];
        assert_eq!(zone_id, "ZROOT");
        assert_eq!(change.record_type, "TXT");
        assert_eq!(change.ttl, CHALLENGE_TTL);
        assert_eq!(change.values, ["\"token\""]);
        assert_eq!(
            change.comment.as_deref(),
            Some("acme-dns certificate validation, action = UPSERT and domain = _acme-challenge.www.example.com.")
        );
        assert_eq!(dns.record("ZROOT", FQDN).await, Some(vec!["\"token\"".to_string()]));
    }

    #[tokio::test]
    async fn provider_failure_is_dns_change_error() {
        let dns = provider();
        dns.set_change_error(Some(mock_error())).await;
        let mutator = RecordMutator::new(dns);

        let err = mutator
            .change_record(ChangeAction::Upsert, FQDN, "token")
            .await
            .unwrap_err();
        assert!(
            matches!(
                &err,
                CoreError::DnsChange { zone_id, action: ChangeAction::Upsert, source: ProviderError::NetworkError { .. }, .. }
                    if zone_id == "ZROOT"
            ),
            "unexpected: {err:?}"
        );
    }

    #[tokio::test]
    async fn listing_failure_propagates_as_provider_error() {
        let dns = provider();
        dns.set_list_zones_error(Some(mock_error())).await;
        let mutator = RecordMutator::new(dns.clone());

        let err = mutator
            .change_record(ChangeAction::Delete, FQDN, "token")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Provider(_)));
        assert!(dns.submitted().await.is_empty());
    }

    #[tokio::test]
    async fn unknown_zone_submits_nothing() {
        let dns = provider();
        let mutator = RecordMutator::new(dns.clone());

        let err = mutator
            .change_record(ChangeAction::Upsert, "_acme-challenge.example.net.", "v")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ZoneNotFound(_)));
        assert!(dns.submitted().await.is_empty());
    }
}
