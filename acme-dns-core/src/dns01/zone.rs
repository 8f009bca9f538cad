//! Authoritative zone resolution
//!
//! Zones are matched label by label: `ample.com` is not an ancestor of
//! `example.com`. A single trailing dot is ignored and labels compare
//! ASCII case-insensitively.

use std::cmp::Reverse;

use acme_dns_provider::HostedZone;

use crate::error::{CoreError, CoreResult};

/// Normalized labels of a name, or `None` if it has an empty label
fn split_labels(name: &str) -> Option<Vec<String>> {
    let trimmed = name.strip_suffix('.').unwrap_or(name);
    if trimmed.is_empty() {
        return None;
    }

    let labels: Vec<String> = trimmed.split('.').map(str::to_ascii_lowercase).collect();
    if labels.iter().any(String::is_empty) {
        return None;
    }
    Some(labels)
}

fn label_count(name: &str) -> usize {
    split_labels(name).map_or(0, |labels| labels.len())
}

/// Order zones most specific first: label count descending, then zone id ascending.
pub fn sort_most_specific(zones: &mut [HostedZone]) {
    zones.sort_by_cached_key(|z| (Reverse(label_count(&z.name)), z.id.clone()));
}

/// Find the id of the most specific public hosted zone containing `domain`.
///
/// Private zones and zones with malformed names are never selected.
pub fn resolve_zone(domain: &str, zones: &[HostedZone]) -> CoreResult<String> {
    let target =
        split_labels(domain).ok_or_else(|| CoreError::ZoneNotFound(domain.to_string()))?;

    let mut candidates: Vec<HostedZone> = zones
        .iter()
        .filter(|z| !z.is_private)
        .filter(|z| split_labels(&z.name).is_some_and(|labels| target.ends_with(&labels)))
        .cloned()
        .collect();

    sort_most_specific(&mut candidates);

    match candidates.into_iter().next() {
        Some(zone) => {
            log::debug!("Resolved zone {} ({}) for {domain}", zone.id, zone.name);
            Ok(zone.id)
        }
        None => Err(CoreError::ZoneNotFound(domain.to_string())),
    }
}
