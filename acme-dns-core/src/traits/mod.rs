//! Collaborator abstractions
//!
//! The ACME protocol client, certificate storage, notification delivery and
//! account persistence are supplied by the host through these traits.

mod account_store;
mod acme_client;
mod cert_store;
mod challenge_provider;
mod notifier;

pub use account_store::AccountStore;
pub use acme_client::{AcmeClient, AcmeClientFactory};
pub use cert_store::CertStore;
pub use challenge_provider::ChallengeProvider;
pub use notifier::Notifier;
