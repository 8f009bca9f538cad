//! Orchestrator configuration
//!
//! Sources, later ones overriding earlier ones:
//! - environment variables ([`OrchestratorConfig::from_env`])
//! - an invocation [`Payload`] ([`OrchestratorConfig::apply_payload`])

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dns01::PropagationConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::{KeyType, LETSENCRYPT_PRODUCTION_DIRECTORY, LETSENCRYPT_STAGING_DIRECTORY};

/// Comma-separated domain list
pub const DOMAINS_ENV: &str = "DOMAINS";
/// ACME account email
pub const EMAIL_ENV: &str = "LETSENCRYPT_EMAIL";
/// `1` selects the staging directory
pub const STAGING_ENV: &str = "STAGING";
/// Notification topic
pub const TOPIC_ENV: &str = "NOTIFICATION_TOPIC";
/// Renewal window in days
pub const RENEW_BEFORE_ENV: &str = "RENEW_BEFORE";

/// Default renewal window in days
pub const DEFAULT_RENEW_BEFORE_DAYS: u32 = 30;

/// Runtime configuration shared by every certificate task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrchestratorConfig {
    pub domains: Vec<String>,
    pub email: String,
    /// Use the Let's Encrypt staging directory
    pub staging: bool,
    /// Notification topic; no notification is sent when `None`
    pub topic: Option<String>,
    pub renew_before_days: u32,
    /// Directory receiving `{email}.pem`
    pub config_dir: PathBuf,
    pub key_type: KeyType,
    pub propagation: PropagationConfig,
    /// Reuse the stored ACME account of the email instead of registering a new one
    pub reuse_account: bool,
    /// Wall-clock budget of one run
    pub deadline: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            email: String::new(),
            staging: false,
            topic: None,
            renew_before_days: DEFAULT_RENEW_BEFORE_DAYS,
            config_dir: PathBuf::from("/tmp"),
            key_type: KeyType::default(),
            propagation: PropagationConfig::default(),
            reuse_account: true,
            deadline: None,
        }
    }
}

/// Invocation payload; non-empty fields override the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payload {
    pub domains: Vec<String>,
    pub email: String,
    /// `"1"` selects staging
    pub staging: String,
    pub topic: String,
    pub renew_before: i64,
}

impl Payload {
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Serialization(e.to_string()))
    }
}

fn parse_domains<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl OrchestratorConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let renew_before_days = match lookup(RENEW_BEFORE_ENV).map(|v| v.trim().parse::<u32>()) {
            Some(Ok(days)) => days,
            Some(Err(e)) => {
                log::warn!(
                    "Invalid {RENEW_BEFORE_ENV}, using {DEFAULT_RENEW_BEFORE_DAYS} days: {e}"
                );
                DEFAULT_RENEW_BEFORE_DAYS
            }
            None => DEFAULT_RENEW_BEFORE_DAYS,
        };

        Self {
            domains: lookup(DOMAINS_ENV)
                .map(|v| parse_domains(v.split(',')))
                .unwrap_or_default(),
            email: non_empty(lookup(EMAIL_ENV)).unwrap_or_default(),
            staging: lookup(STAGING_ENV).is_some_and(|v| v.trim() == "1"),
            topic: non_empty(lookup(TOPIC_ENV)),
            renew_before_days,
            ..Self::default()
        }
    }

    /// Overlay the non-empty fields of `payload`
    pub fn apply_payload(&mut self, payload: &Payload) {
        let domains = parse_domains(payload.domains.iter().map(String::as_str));
        if !domains.is_empty() {
            self.domains = domains;
        }
        if let Some(email) = non_empty(Some(payload.email.clone())) {
            self.email = email;
        }
        if !payload.staging.is_empty() {
            self.staging = payload.staging.trim() == "1";
        }
        if let Some(topic) = non_empty(Some(payload.topic.clone())) {
            self.topic = Some(topic);
        }
        if payload.renew_before > 0 {
            if let Ok(days) = u32::try_from(payload.renew_before) {
                self.renew_before_days = days;
            }
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.email.trim().is_empty() {
            return Err(CoreError::Validation("email must be filled".to_string()));
        }
        if self.domains.is_empty() {
            return Err(CoreError::Validation(
                "domains list must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// ACME directory selected by the staging flag
    pub fn directory_url(&self) -> &'static str {
        if self.staging {
            LETSENCRYPT_STAGING_DIRECTORY
        } else {
            LETSENCRYPT_PRODUCTION_DIRECTORY
        }
    }
}
