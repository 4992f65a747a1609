//! Logging setup.
//!
//! Logs go to stderr so that a response streamed to stdout stays clean.

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| AppError::Config(format!("Invalid log level '{}': {}", default_level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| AppError::Config(format!("Logger already initialized: {}", e)))
}
