//! `tls-server` — binary entry point.
//!
//! Startup sequence:
//! 1. Parse [`Config`] from the command line.
//! 2. Initialise structured JSON logging.
//! 3. Load the TLS identity, then bind the listener. Either failure is fatal.
//! 4. Serve until killed.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use tls_server::{telemetry, Config, Server};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::parse();

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        cert = %cfg.cert_path.display(),
        key = %cfg.key_path.display(),
        "tls-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Identity + listener
    // -----------------------------------------------------------------------
    let server = match Server::bind(&cfg.cert_path, &cfg.key_path, cfg.listen_addr()).await {
        Ok(server) => server,
        Err(e) => {
            let e = anyhow::Error::new(e);
            let chain = format!("{e:#}");
            error!(error = %chain, "startup failed");
            return Err(e);
        }
    };

    // -----------------------------------------------------------------------
    // 4. Serve
    // -----------------------------------------------------------------------
    server.run().await;
    Ok(())
}
