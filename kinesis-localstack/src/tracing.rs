use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a tracing subscriber which writes through the test harness' captured output.
///
/// - `rust_log`: filter used when `RUST_LOG` is not set, e.g. `info,kinesis_localstack=debug`
///
/// Setting `JSON_LOGS` switches to JSON output. Safe to call from every test, only the
/// first call installs a subscriber.
pub fn init_test_tracing(rust_log: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(rust_log));

    let json_logs = env::var_os("JSON_LOGS").is_some();

    let layer = if json_logs {
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .json()
            .flatten_event(true)
            .with_span_list(false)
            .boxed()
    } else {
        fmt::layer().with_test_writer().with_target(true).boxed()
    };

    // Another test may have got there first
    let _ = tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init();
}
