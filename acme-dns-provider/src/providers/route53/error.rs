//! Route53 error mapping
//!
//! Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
//!
//! Codes that matter for challenge records are mapped explicitly; everything
//! else (health checks, traffic policies, DNSSEC, ...) falls back to `Unknown`.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Provider;

impl ProviderErrorMapper for Route53Provider {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ Authentication ============
            Some(
                "InvalidClientTokenId"
                | "SignatureDoesNotMatch"
                | "IncompleteSignature"
                | "MissingAuthenticationToken"
                | "UnrecognizedClientException"
                | "ExpiredToken",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Authorization ============
            Some("AccessDenied" | "AccessDeniedException") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Throttling ============
            Some("Throttling" | "ThrottlingException" | "PriorRequestNotComplete") => {
                ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ Quotas ============
            Some("LimitsExceeded" | "TooManyHostedZones") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Missing resources ============
            Some("NoSuchHostedZone") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone_id: context.zone_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },
            Some("NoSuchChange") => ProviderError::ChangeNotFound {
                provider: self.provider_name().to_string(),
                change_id: context.change_id.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ Change batch ============
            // Deleting an absent record set: "Tried to delete resource record set [...] but it was not found"
            Some("InvalidChangeBatch") if raw.message.contains("not found") => {
                ProviderError::RecordNotFound {
                    provider: self.provider_name().to_string(),
                    record_name: context.record_name.unwrap_or_default(),
                    raw_message: Some(raw.message),
                }
            }
            Some("InvalidChangeBatch") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "ChangeBatch".to_string(),
                detail: raw.message,
            },
            Some("InvalidInput") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "input".to_string(),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
