//! Telemetry initialisation: structured JSON logs only.
//!
//! `RUST_LOG` overrides the default level when set.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Initialise the tracing subscriber.
///
/// Outputs structured JSON logs to stdout.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tracing subscriber: {e}"))
}
