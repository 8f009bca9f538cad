//! Type definitions

mod account;
mod acme;
mod certificate;
mod task;

pub use account::{Registration, StoredAccount, UserAccount};
pub use acme::{
    AcmeClientConfig, CertificateRequest, KeyType, RegisterOptions,
    LETSENCRYPT_PRODUCTION_DIRECTORY, LETSENCRYPT_STAGING_DIRECTORY,
};
pub use certificate::{CertificateBundle, CertificateExpiry, ObtainRequest};
pub use task::{DomainReport, ObtainOutcome, RunSummary, Stage, StageWarning, TaskError};

// Re-export the public types of the provider library
pub use acme_dns_provider::{
    ChangeAction, ChangeInfo, ChangeStatus, HostedZone, ProviderCredentials, RecordSetChange,
};
