//! Renewal decision

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::CertificateExpiry;

/// Whether a certificate has to be (re)issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum RenewalDecision {
    /// Nothing stored yet
    NoCertificate,
    /// Expiry falls inside the renewal window
    #[serde(rename_all = "camelCase")]
    Renew { remaining_hours: i64 },
    /// Still valid beyond the renewal window
    #[serde(rename_all = "camelCase")]
    Skip { remaining_hours: i64 },
}

impl RenewalDecision {
    pub fn is_renewal_required(&self) -> bool {
        !matches!(self, Self::Skip { .. })
    }

    /// Whole days of validity left, if a certificate exists
    pub fn remaining_days(&self) -> Option<i64> {
        match self {
            Self::NoCertificate => None,
            Self::Renew { remaining_hours } | Self::Skip { remaining_hours } => {
                Some(remaining_hours / 24)
            }
        }
    }
}

/// Renew when at most `threshold_days * 24` hours of validity remain.
pub fn should_renew(
    existing: Option<&CertificateExpiry>,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> RenewalDecision {
    let Some(expiry) = existing else {
        return RenewalDecision::NoCertificate;
    };

    let remaining_hours = (expiry.not_after - now).num_hours();
    if remaining_hours <= i64::from(threshold_days) * 24 {
        RenewalDecision::Renew { remaining_hours }
    } else {
        RenewalDecision::Skip { remaining_hours }
    }
}
