//! Configuration loading and validation for the probe client.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated probe client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Host (optionally `host:port`) to probe over HTTPS.
    #[serde(default = "default_hostname")]
    pub kubernetes_hostname: String,

    /// PEM file holding the CA certificate(s) to trust. Nothing else is trusted.
    #[serde(default = "default_ca_cert")]
    pub kubernetes_ca_cert: PathBuf,
}

fn default_hostname() -> String {
    "kubernetes".into()
}
fn default_ca_cert() -> PathBuf {
    "certs/1.16/ca.crt".into()
}

impl Config {
    /// Load configuration from environment variables without validating it.
    ///
    /// Callers run [`Config::validate`] once diagnostics have been logged.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build probe client configuration")?;

        cfg.try_deserialize()
            .context("failed to deserialise probe client configuration")
    }

    /// The URL the probe requests: the root path of the configured host.
    pub fn url(&self) -> String {
        format!("https://{}/", self.kubernetes_hostname.trim())
    }

    /// Reject blank values.
    pub fn validate(&self) -> Result<()> {
        if self.kubernetes_hostname.trim().is_empty() {
            anyhow::bail!("KUBERNETES_HOSTNAME must not be empty");
        }
        if self.kubernetes_ca_cert.as_os_str().is_empty() {
            anyhow::bail!("KUBERNETES_CA_CERT must not be empty");
        }
        Ok(())
    }
}

/// What the probe can tell about the CA file before trying to use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaFileStatus {
    pub exists: bool,
    /// Only checked when the file exists.
    pub readable: Option<bool>,
}

impl CaFileStatus {
    pub fn inspect(path: &Path) -> Self {
        let exists = path.exists();
        let readable = exists.then(|| File::open(path).is_ok());
        Self { exists, readable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(default_hostname(), "kubernetes");
        assert_eq!(default_ca_cert(), PathBuf::from("certs/1.16/ca.crt"));
    }

    #[test]
    fn url_points_at_root() {
        let cfg = Config {
            kubernetes_hostname: "localhost:8443".into(),
            kubernetes_ca_cert: default_ca_cert(),
        };
        assert_eq!(cfg.url(), "https://localhost:8443/");
    }

    #[test]
    fn validate_rejects_blank_hostname() {
        let cfg = Config {
            kubernetes_hostname: "   ".into(),
            kubernetes_ca_cert: default_ca_cert(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_ca_path() {
        let cfg = Config {
            kubernetes_hostname: default_hostname(),
            kubernetes_ca_cert: PathBuf::new(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_accepts_defaults() {
        let cfg = Config {
            kubernetes_hostname: default_hostname(),
            kubernetes_ca_cert: default_ca_cert(),
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_ca_file_has_no_readability() {
        let status = CaFileStatus::inspect(Path::new("/definitely/not/here/ca.crt"));
        assert_eq!(
            status,
            CaFileStatus {
                exists: false,
                readable: None
            }
        );
    }

    #[test]
    fn present_ca_file_is_readable() {
        let ca = Path::new(env!("CARGO_MANIFEST_DIR")).join("../tls-server/testdata/ca.crt");
        let status = CaFileStatus::inspect(&ca);
        assert!(status.exists);
        assert_eq!(status.readable, Some(true));
    }
}
