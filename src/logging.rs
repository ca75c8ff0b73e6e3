//! Tracing subscriber setup
//!
//! Logs go to stderr so that stdout only carries the rendered forecast.

use crate::config::LoggingConfig;
use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Log level to use, `--verbose` raising the configured one to `debug`
#[must_use]
pub fn effective_level(config: &LoggingConfig, verbose: bool) -> &str {
    if verbose && matches!(config.level.as_str(), "error" | "warn" | "info") {
        "debug"
    } else {
        config.level.as_str()
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configuration.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(config, verbose)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if config.format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
