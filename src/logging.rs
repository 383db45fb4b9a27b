//! Native log output. The library only emits `tracing` events; binaries
//! decide where they go.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter directive env var, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "EDUCHAIN_LOG";
/// Set to `1` for JSON lines instead of human-readable output.
pub const LOG_JSON_ENV: &str = "EDUCHAIN_LOG_JSON";

const DEFAULT_FILTER: &str = "warn,educhain=info";

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let use_json = std::env::var(LOG_JSON_ENV)
        .map(|value| value == "1")
        .unwrap_or(false);

    // CLI output goes to stdout; logs stay on stderr.
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = if use_json {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
}
