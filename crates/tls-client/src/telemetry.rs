//! Telemetry initialisation for the probe client.
//!
//! Logs go to stderr so that stdout carries only the fetched JSON document.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber at `log_level` unless `RUST_LOG` is set.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise probe client tracing subscriber: {e}"))
}
