pub mod builders;
pub mod recording_ui;

use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Bound on every await in the integration tests. The fixture interpreter
/// scripts respond immediately, so anything slower than this is a hang.
pub const EVENT_WAIT: Duration = Duration::from_secs(5);

/// Set up a test-writer tracing subscriber, once per test binary.
///
/// Output is captured per test, so it only shows for failures (or with
/// `-- --nocapture`). `RUST_LOG` selects levels, default `info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Await `f`, panicking after [`EVENT_WAIT`] so a lost supervisor event
/// fails the test instead of stalling the suite.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(EVENT_WAIT, f)
        .await
        .unwrap_or_else(|_| panic!("no result within {EVENT_WAIT:?}"))
}
