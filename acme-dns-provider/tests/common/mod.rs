//! Shared integration test helpers

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use acme_dns_provider::{DnsProvider, HostedZone, ProviderCredentials, create_provider};

/// Skip the test when a required environment variable is missing
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert `Option` is `Some` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Unique record name below the test zone
pub fn generate_test_record_name(zone: &str) -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}.{}", &uuid.to_string()[..8], zone.trim_end_matches('.'))
}

/// Test context: provider plus the zone under test
pub struct TestContext {
    pub provider: Arc<dyn DnsProvider>,
    pub zone_name: String,
}

impl TestContext {
    /// Build a Route53 context from `AWS_*` credentials and `TEST_ZONE`
    pub fn route53() -> Option<Self> {
        let credentials = ProviderCredentials::from_env().ok()?;
        let zone_name = env::var("TEST_ZONE").ok()?;
        let provider = create_provider(credentials).ok()?;

        Some(Self {
            provider,
            zone_name,
        })
    }

    /// Find the hosted zone named `TEST_ZONE`
    pub async fn find_zone(&self) -> Option<HostedZone> {
        let wanted = self.zone_name.trim_end_matches('.');
        self.provider
            .list_zones()
            .await
            .ok()?
            .into_iter()
            .find(|z| !z.is_private && z.name.trim_end_matches('.') == wanted)
    }
}
