//! Route53 `DnsProvider` implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quick_xml::escape::escape;

use crate::error::{ProviderError, Result};
use crate::providers::common::{strip_id_prefix, to_fqdn};
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{ChangeInfo, ChangeStatus, HostedZone, RecordSetChange};

use super::types::{ChangeInfoResponse, ListHostedZonesResponse};
use super::{MAX_ZONES_PER_PAGE, ROUTE53_API_VERSION, ROUTE53_XMLNS, Route53Provider};

const HOSTED_ZONE_PREFIX: &str = "/hostedzone/";
const CHANGE_PREFIX: &str = "/change/";

impl Route53Provider {
    fn convert_change_info(&self, raw: super::types::ChangeInfo) -> Result<ChangeInfo> {
        let status = match raw.status.as_str() {
            "PENDING" => ChangeStatus::Pending,
            "INSYNC" => ChangeStatus::InSync,
            other => return Err(self.parse_error(format!("unknown change status '{other}'"))),
        };

        let submitted_at = raw
            .submitted_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&Utc));

        Ok(ChangeInfo {
            id: strip_id_prefix(&raw.id, CHANGE_PREFIX).to_string(),
            status,
            submitted_at,
        })
    }

    async fn list_zones_page(
        &self,
        marker: Option<&str>,
        max_items: u32,
    ) -> Result<ListHostedZonesResponse> {
        let query = match marker {
            Some(m) => format!("marker={}&maxitems={max_items}", urlencoding::encode(m)),
            None => format!("maxitems={max_items}"),
        };
        self.get(
            &format!("/{ROUTE53_API_VERSION}/hostedzone"),
            &query,
            ErrorContext::default(),
        )
        .await
    }
}

/// Render a `ChangeResourceRecordSetsRequest` document with a single change.
pub(crate) fn build_change_batch_xml(change: &RecordSetChange) -> String {
    let records: String = change
        .values
        .iter()
        .map(|v| {
            format!(
                "<ResourceRecord><Value>{}</Value></ResourceRecord>",
                escape(v.as_str())
            )
        })
        .collect();

    let comment = change
        .comment
        .as_deref()
        .map(|c| format!("<Comment>{}</Comment>", escape(c)))
        .unwrap_or_default();

    let name = to_fqdn(&change.name);

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<ChangeResourceRecordSetsRequest xmlns="{xmlns}">"#,
            "<ChangeBatch>{comment}<Changes><Change>",
            "<Action>{action}</Action>",
            "<ResourceRecordSet>",
            "<Name>{name}</Name><Type>{record_type}</Type><TTL>{ttl}</TTL>",
            "<ResourceRecords>{records}</ResourceRecords>",
            "</ResourceRecordSet>",
            "</Change></Changes></ChangeBatch>",
            "</ChangeResourceRecordSetsRequest>"
        ),
        xmlns = ROUTE53_XMLNS,
        comment = comment,
        action = change.action.as_str(),
        name = escape(name.as_str()),
        record_type = escape(change.record_type.as_str()),
        ttl = change.ttl,
        records = records,
    )
}

#[async_trait]
impl DnsProvider for Route53Provider {
    fn id(&self) -> &'static str {
        "route53"
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self.list_zones_page(None, 1).await {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn list_zones(&self) -> Result<Vec<HostedZone>> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let page = self
                .list_zones_page(marker.as_deref(), MAX_ZONES_PER_PAGE)
                .await?;

            zones.extend(page.hosted_zones.items.into_iter().map(|z| {
                HostedZone::new(
                    strip_id_prefix(&z.id, HOSTED_ZONE_PREFIX),
                    z.name,
                    z.config.is_some_and(|c| c.private_zone),
                )
            }));

            match (page.is_truncated, page.next_marker) {
                (true, Some(next)) => marker = Some(next),
                _ => break,
            }
        }

        log::debug!("[{}] Listed {} hosted zones", self.id(), zones.len());
        Ok(zones)
    }

    async fn change_record_set(
        &self,
        zone_id: &str,
        change: &RecordSetChange,
    ) -> Result<ChangeInfo> {
        let zone_id = strip_id_prefix(zone_id, HOSTED_ZONE_PREFIX);
        let body = build_change_batch_xml(change);
        let ctx = ErrorContext {
            record_name: Some(to_fqdn(&change.name)),
            zone_id: Some(zone_id.to_string()),
            change_id: None,
        };

        let resp: ChangeInfoResponse = self
            .post_xml(
                &format!("/{ROUTE53_API_VERSION}/hostedzone/{zone_id}/rrset/"),
                body,
                ctx,
            )
            .await?;

        self.convert_change_info(resp.change_info)
    }

    async fn get_change(&self, change_id: &str) -> Result<ChangeInfo> {
        let change_id = strip_id_prefix(change_id, CHANGE_PREFIX);
        let ctx = ErrorContext {
            change_id: Some(change_id.to_string()),
            ..Default::default()
        };

        let resp: ChangeInfoResponse = self
            .get(&format!("/{ROUTE53_API_VERSION}/change/{change_id}"), "", ctx)
            .await?;

        self.convert_change_info(resp.change_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChangeAction;

    fn txt_change(action: ChangeAction, value: &str) -> RecordSetChange {
        RecordSetChange {
            action,
            name: "_acme-challenge.example.com".to_string(),
            record_type: "TXT".to_string(),
            ttl: 60,
            values: vec![value.to_string()],
            comment: Some("validation for example.com".to_string()),
        }
    }

    #[test]
    fn change_batch_contains_record_set() {
        let xml = build_change_batch_xml(&txt_change(ChangeAction::Upsert, "\"abc\""));
        assert!(xml.contains("<Action>UPSERT</Action>"));
        assert!(xml.contains("<Name>_acme-challenge.example.com.</Name>"));
        assert!(xml.contains("<Type>TXT</Type><TTL>60</TTL>"));
        assert!(xml.contains("<Value>&quot;abc&quot;</Value>"));
        assert!(xml.contains("<Comment>validation for example.com</Comment>"));
    }

    #[test]
    fn change_batch_escapes_markup() {
        let xml = build_change_batch_xml(&txt_change(ChangeAction::Delete, "<a&b>"));
        assert!(xml.contains("<Action>DELETE</Action>"));
        assert!(xml.contains("<Value>&lt;a&amp;b&gt;</Value>"));
    }

    #[test]
    fn change_batch_round_trips_through_parser() {
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Req {
            change_batch: Batch,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Batch {
            changes: Changes,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Changes {
            change: Change,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Change {
            resource_record_set: Rrs,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Rrs {
            resource_records: Records,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Records {
            resource_record: Record,
        }
        #[derive(serde::Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct Record {
            value: String,
        }

        let xml = build_change_batch_xml(&txt_change(ChangeAction::Upsert, "\"a<b\""));
        let parsed: std::result::Result<Req, _> = quick_xml::de::from_str(&xml);
        let value = parsed.map(|r| {
            r.change_batch
                .changes
                .change
                .resource_record_set
                .resource_records
                .resource_record
                .value
        });
        assert_eq!(value.ok().as_deref(), Some("\"a<b\""));
    }

    #[test]
    fn change_info_conversion() {
        let built = Route53Provider::new("AKID".to_string(), "secret".to_string(), None);
        let Ok(provider) = built else {
            return;
        };
        let info = provider.convert_change_info(super::super::types::ChangeInfo {
            id: "/change/C1".to_string(),
            status: "INSYNC".to_string(),
            submitted_at: Some("2017-03-10T01:36:41.958Z".to_string()),
        });
        assert!(
            matches!(&info, Ok(ChangeInfo { id, status: ChangeStatus::InSync, submitted_at: Some(_) }) if id == "C1"),
            "unexpected: {info:?}"
        );

        let bad = provider.convert_change_info(super::super::types::ChangeInfo {
            id: "C2".to_string(),
            status: "WEIRD".to_string(),
            submitted_at: None,
        });
        assert!(matches!(bad, Err(ProviderError::ParseError { .. })));
    }
}
