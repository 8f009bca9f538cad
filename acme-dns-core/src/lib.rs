//! ACME DNS-01 Core Library
//!
//! Provides the certificate lifecycle logic, including:
//! - DNS-01 challenge fulfilment (zone resolution, TXT mutation, propagation wait)
//! - Renewal decision
//! - Certificate orchestration across many domains (`CertificateService`)
//!
//! The ACME protocol client, certificate storage, notification delivery and
//! account persistence are abstracted through traits so hosts can plug in
//! their own implementations.

pub mod config;
pub mod dns01;
pub mod error;
pub mod renewal;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use config::{OrchestratorConfig, Payload};
pub use error::{CoreError, CoreResult};
pub use services::{AccountService, CertificateService, ServiceContext};
pub use traits::{
    AccountStore, AcmeClient, AcmeClientFactory, CertStore, ChallengeProvider, Notifier,
};
