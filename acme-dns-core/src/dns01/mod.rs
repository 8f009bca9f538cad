//! DNS-01 challenge fulfilment
//!
//! Leaves first: [`zone`] picks the authoritative hosted zone, [`record`]
//! mutates the TXT record set, [`propagation`] polls the change until it is in
//! sync, and [`challenge`] ties them together behind [`ChallengeProvider`].
//!
//! [`ChallengeProvider`]: crate::traits::ChallengeProvider

pub mod challenge;
pub mod propagation;
pub mod record;
pub mod zone;

pub use challenge::{challenge_record_fqdn, challenge_record_value, DnsChallengeProvider};
pub use propagation::{PropagationConfig, PropagationOutcome, PropagationWaiter};
pub use record::{quote_txt_value, RecordMutator, CHALLENGE_TTL};
pub use zone::{resolve_zone, sort_most_specific};
