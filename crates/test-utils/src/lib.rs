//! Shared fixtures for forgewatch's integration tests: config and event
//! builders, a recording notification backend and a process launcher that
//! never spawns anything.

pub mod builders;
pub mod fake_backend;
pub mod fake_launcher;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use forgewatch::logging::LOG_ENV_VAR;
use tracing_subscriber::{EnvFilter, fmt};

static TRACING: Once = Once::new();

/// Upper bound for any single awaited step in a test.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a test-writer subscriber once per test binary.
///
/// The filter comes from `FORGEWATCH_LOG` (any `EnvFilter` directive, e.g.
/// `forgewatch::watch=debug`) and defaults to `info`. Output is captured by
/// the harness and shown for failing tests only.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        // Another subscriber may already be installed by the test itself.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(value) => value,
        Err(_) => panic!("test step did not finish within {TEST_TIMEOUT:?}"),
    }
}
