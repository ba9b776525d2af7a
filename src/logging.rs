//! Diagnostic logging through `tracing`.
//!
//! Events go to stderr so stdout carries only the progress lines. The filter
//! comes from [`crate::config::log_filter`]; an unparseable directive falls
//! back to the default level instead of failing the import.

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Install the global subscriber. Later calls are no-ops.
pub fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
