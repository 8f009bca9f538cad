//! File and HTTP adapters for the core collaborator traits.

mod file_account_store;
mod file_cert_store;
mod webhook_notifier;

pub use file_account_store::FileAccountStore;
pub use file_cert_store::{parse_not_after, FileCertStore};
pub use webhook_notifier::WebhookNotifier;
