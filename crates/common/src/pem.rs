//! PEM file loading for certificate chains, CA bundles, and private keys.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};

use crate::error::PemError;

/// Read every certificate in the PEM file at `path`, in file order.
///
/// # Errors
///
/// Fails if the file cannot be opened, a section is malformed, or the file
/// holds no certificates at all.
pub fn read_certs(path: impl AsRef<Path>) -> Result<Vec<CertificateDer<'static>>, PemError> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    certs_from_reader(&mut reader, path)
}

/// Read the first private key (PKCS#1, PKCS#8 or SEC1) in the PEM file at `path`.
///
/// # Errors
///
/// Fails if the file cannot be opened, a section is malformed, or the file
/// holds no private key.
pub fn read_private_key(path: impl AsRef<Path>) -> Result<PrivateKeyDer<'static>, PemError> {
    let path = path.as_ref();
    let mut reader = open(path)?;
    private_key_from_reader(&mut reader, path)
}

fn open(path: &Path) -> Result<BufReader<File>, PemError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| PemError::Io {
            path: path.to_owned(),
            source,
        })
}

fn certs_from_reader(
    reader: &mut dyn BufRead,
    path: &Path,
) -> Result<Vec<CertificateDer<'static>>, PemError> {
    let certs = rustls_pemfile::certs(reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| PemError::Parse {
            path: path.to_owned(),
            source,
        })?;

    if certs.is_empty() {
        return Err(PemError::NoCertificates {
            path: path.to_owned(),
        });
    }
    Ok(certs)
}

fn private_key_from_reader(
    reader: &mut dyn BufRead,
    path: &Path,
) -> Result<PrivateKeyDer<'static>, PemError> {
    rustls_pemfile::private_key(reader)
        .map_err(|source| PemError::Parse {
            path: path.to_owned(),
            source,
        })?
        .ok_or_else(|| PemError::NoPrivateKey {
            path: path.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../tls-server/testdata")
            .join(name)
    }

    #[test]
    fn reads_server_certificate() {
        let certs = read_certs(fixture("server.crt")).unwrap();
        assert_eq!(certs.len(), 1);
    }

    #[test]
    fn reads_pkcs8_key() {
        let key = read_private_key(fixture("server.key")).unwrap();
        assert!(matches!(key, PrivateKeyDer::Pkcs8(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_certs(fixture("does-not-exist.crt")).unwrap_err();
        assert!(matches!(err, PemError::Io { .. }));
    }

    #[test]
    fn key_file_has_no_certificates() {
        let err = read_certs(fixture("server.key")).unwrap_err();
        assert!(matches!(err, PemError::NoCertificates { .. }));
    }

    #[test]
    fn cert_file_has_no_private_key() {
        let err = read_private_key(fixture("server.crt")).unwrap_err();
        assert!(matches!(err, PemError::NoPrivateKey { .. }));
    }

    #[test]
    fn garbage_has_no_certificates() {
        let mut data: &[u8] = b"not a pem";
        let err = certs_from_reader(&mut data, Path::new("inline")).unwrap_err();
        assert!(matches!(err, PemError::NoCertificates { .. }));
    }

    #[test]
    fn corrupt_section_is_parse_error() {
        let mut data: &[u8] =
            b"-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n";
        let err = certs_from_reader(&mut data, Path::new("inline")).unwrap_err();
        assert!(matches!(err, PemError::Parse { .. }));
    }
}
