//! Tracing setup for the invctl CLI
//!
//! Usage:
//!   invctl --debug ...              # Debug logging
//!   RUST_LOG=invctl_core=debug invctl  # Fine-grained log control
//!
//! Logs go to stderr so stdout only carries command output.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Force debug level unless RUST_LOG is set
    pub debug: bool,
    /// Filter used when RUST_LOG is unset (from config file)
    pub default_level: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_level: "info".to_string(),
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let fallback = if config.debug {
        "debug"
    } else {
        config.default_level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
