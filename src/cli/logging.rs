//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

use crate::domain::config::DEFAULT_LOG_LEVEL;

/// Build the log filter. `RUST_LOG` wins over the configured level; an
/// unparsable level falls back to the default.
pub fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Install the stderr subscriber. Later calls are no-ops.
pub fn init_logging(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
