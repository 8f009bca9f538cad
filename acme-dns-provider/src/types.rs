//! Provider-agnostic DNS types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Zones ============

/// A hosted zone visible to the authenticated account.
///
/// Zones are a point-in-time snapshot: callers are expected to list them again
/// whenever they need current topology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    /// Opaque provider identifier (prefix such as `/hostedzone/` already stripped).
    pub id: String,
    /// Zone apex, usually with a trailing dot (`example.com.`).
    pub name: String,
    /// Private zones are only resolvable inside a VPC and never serve ACME challenges.
    pub is_private: bool,
}

impl HostedZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_private: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_private,
        }
    }
}

// ============ Record set changes ============

/// Mutation applied to a resource record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Create the record set, or replace it if it already exists.
    Upsert,
    /// Delete the record set. The values must match the live record exactly.
    Delete,
}

impl ChangeAction {
    /// Wire representation (`UPSERT` / `DELETE`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upsert => "UPSERT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single record set mutation submitted to a zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetChange {
    pub action: ChangeAction,
    /// Fully-qualified record name.
    pub name: String,
    /// Record type, e.g. `TXT`.
    pub record_type: String,
    pub ttl: u32,
    /// Record values in wire format (TXT values already quoted).
    pub values: Vec<String>,
    /// Free-form comment attached to the change batch.
    pub comment: Option<String>,
}

/// Propagation state of a submitted change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeStatus {
    /// Not yet applied to all authoritative name servers.
    Pending,
    /// Applied to all authoritative name servers.
    InSync,
}

/// Result of submitting or polling a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    /// Opaque change identifier (prefix such as `/change/` already stripped).
    pub id: String,
    pub status: ChangeStatus,
    pub submitted_at: Option<DateTime<Utc>>,
}

// ============ Credentials ============

/// Environment variable holding the AWS access key id.
pub const AWS_ACCESS_KEY_ID_ENV: &str = "AWS_ACCESS_KEY_ID";
/// Environment variable holding the AWS secret access key.
pub const AWS_SECRET_ACCESS_KEY_ENV: &str = "AWS_SECRET_ACCESS_KEY";
/// Environment variable holding an optional AWS session token.
pub const AWS_SESSION_TOKEN_ENV: &str = "AWS_SESSION_TOKEN";

/// Credential validation error.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Machine-readable field key.
        field: String,
    },
    /// A credential field is present but empty/whitespace-only.
    #[error("Field must not be empty: {field}")]
    EmptyField {
        /// Machine-readable field key.
        field: String,
    },
}

/// Type-safe credential container for supported DNS providers.
///
/// Pass this to [`create_provider()`](crate::create_provider) to instantiate a provider.
///
/// # Serialization
///
/// ```json
/// { "provider": "route53", "credentials": { "access_key_id": "...", "secret_access_key": "..." } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", content = "credentials")]
pub enum ProviderCredentials {
    /// AWS Route53 credentials (static keys, optionally with an STS session token).
    #[serde(rename = "route53")]
    Route53 {
        /// AWS access key id.
        access_key_id: String,
        /// AWS secret access key.
        secret_access_key: String,
        /// STS session token for temporary credentials.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        session_token: Option<String>,
    },
}

impl ProviderCredentials {
    /// Read Route53 credentials from the standard AWS environment variables.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, CredentialValidationError> {
            match lookup(key) {
                None => Err(CredentialValidationError::MissingField {
                    field: key.to_string(),
                }),
                Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                    field: key.to_string(),
                }),
                Some(v) => Ok(v.trim().to_string()),
            }
        };

        Ok(Self::Route53 {
            access_key_id: required(AWS_ACCESS_KEY_ID_ENV)?,
            secret_access_key: required(AWS_SECRET_ACCESS_KEY_ENV)?,
            session_token: lookup(AWS_SESSION_TOKEN_ENV).filter(|t| !t.trim().is_empty()),
        })
    }
}
