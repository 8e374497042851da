//! `tls-client` — probe binary entry point.
//!
//! Startup sequence:
//! 1. Initialise structured JSON logging on stderr.
//! 2. Load [`Config`] from environment variables, log CA file diagnostics,
//!    then validate.
//! 3. Build a TLS client trusting only the configured CA.
//! 4. `GET https://<host>/`, print the JSON body pretty-printed on stdout.
//!
//! Any failure is reported on stderr and the process exits with status 1.

mod config;
mod probe;
mod telemetry;

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use config::{CaFileStatus, Config};

const LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(LOG_LEVEL)?;

    // -----------------------------------------------------------------------
    // 2. Configuration: CA diagnostics first, then validation
    // -----------------------------------------------------------------------
    let cfg = Config::from_env()?;

    let ca = &cfg.kubernetes_ca_cert;
    let status = CaFileStatus::inspect(ca);
    match status.readable {
        Some(readable) => {
            info!(ca_cert = %ca.display(), exists = status.exists, readable, "using CA certificate")
        }
        None => info!(ca_cert = %ca.display(), exists = status.exists, "using CA certificate"),
    }

    cfg.validate()?;

    // -----------------------------------------------------------------------
    // 3. TLS client
    // -----------------------------------------------------------------------
    let tls = probe::client_config(ca)?;

    // -----------------------------------------------------------------------
    // 4. Probe
    // -----------------------------------------------------------------------
    let url = cfg.url();
    let uri = probe::parse_url(&url)?;
    let value = match probe::fetch_json(tls, uri).await {
        Ok(v) => v,
        Err(e) if e.is_decode() => {
            return Err(anyhow::Error::new(e).context("Error decoding response"));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context(format!("Error connecting to {url}")));
        }
    };

    println!("{}", probe::render(&value)?);
    Ok(())
}
