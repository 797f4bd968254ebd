//! Logging.
//!
//! Everything is written to stderr, stdout is reserved for the report.

use std::io;

use tracing::debug;

use crate::config::TracingConfig;

/// Initializes the global `tracing` logger.
///
/// # Panics
/// This function panics if a global logger was already set.
pub fn init_logging(config: &TracingConfig) {
    tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    debug!("log level: {}", config.level);
}
