//! Tracing setup for the API binary.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Filtering comes from `LEADPOOL_LOG` (RUST_LOG syntax, default `info`);
/// `LEADPOOL_LOG_JSON=1` switches to JSON output for log shippers. Safe to
/// call once per process; tests use their own subscribers.
pub fn init() {
    let filter = EnvFilter::try_from_env("LEADPOOL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var("LEADPOOL_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
