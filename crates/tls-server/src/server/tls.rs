//! TLS identity loading using rustls.
//!
//! The certificate chain and private key are read from PEM files named on the
//! command line and turned into a `rustls::ServerConfig`. No pre-validation
//! happens beyond what the PEM parser and rustls do themselves.

use std::path::Path;
use std::sync::Arc;

use common::pem;
use common::PemError;
use rustls::crypto::ring;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::ServerConfig;
use thiserror::Error;

/// ALPN protocols offered to clients, most preferred first.
const ALPN_PROTOCOLS: [&[u8]; 2] = [b"h2", b"http/1.1"];

/// The certificate/key pair could not be turned into a server identity.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// A PEM file was missing, unreadable, or empty.
    #[error(transparent)]
    Pem(#[from] PemError),

    /// rustls refused the pair (e.g. key does not match the certificate).
    #[error("TLS certificate and private key rejected")]
    Rejected(#[from] rustls::Error),
}

/// Read the PEM files at `cert_path` and `key_path` and build a server config.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, or if rustls
/// rejects the resulting pair.
pub fn load_server_config(
    cert_path: &Path,
    key_path: &Path,
) -> Result<Arc<ServerConfig>, IdentityError> {
    let certs = pem::read_certs(cert_path)?;
    let key = pem::read_private_key(key_path)?;
    build_server_config(certs, key)
}

/// Build a [`rustls::ServerConfig`] from a parsed certificate chain and private key.
///
/// Uses the `ring` provider explicitly so the result does not depend on a
/// process-wide default provider being installed.
///
/// # Errors
///
/// Returns an error if rustls rejects the configuration.
pub fn build_server_config(
    certs: Vec<CertificateDer<'static>>,
    key: PrivateKeyDer<'static>,
) -> Result<Arc<ServerConfig>, IdentityError> {
    let mut config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    config.alpn_protocols = ALPN_PROTOCOLS.iter().map(|p| p.to_vec()).collect();

    Ok(Arc::new(config))
}
