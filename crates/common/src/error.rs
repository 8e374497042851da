//! Common error types shared across crates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load PEM-encoded certificates or keys from disk.
///
/// Every variant carries the offending path so that a fatal startup log line
/// tells the operator exactly which file to fix.
#[derive(Debug, Error)]
pub enum PemError {
    /// The file could not be opened.
    #[error("cannot open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was readable but a PEM section could not be decoded.
    #[error("malformed PEM data in {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file contains no `CERTIFICATE` sections.
    #[error("no certificates found in {}", path.display())]
    NoCertificates { path: PathBuf },

    /// The file contains no PKCS#1, PKCS#8 or SEC1 private key.
    #[error("no private key found in {}", path.display())]
    NoPrivateKey { path: PathBuf },
}

impl PemError {
    /// The file this error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            PemError::Io { path, .. }
            | PemError::Parse { path, .. }
            | PemError::NoCertificates { path }
            | PemError::NoPrivateKey { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_path() {
        let e = PemError::NoPrivateKey {
            path: "/etc/tls/server.key".into(),
        };
        assert!(e.to_string().contains("/etc/tls/server.key"));
    }

    #[test]
    fn io_error_keeps_source() {
        let e = PemError::Io {
            path: "server.crt".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let source = std::error::Error::source(&e).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("gone"));
        assert_eq!(e.path(), std::path::Path::new("server.crt"));
    }
}
