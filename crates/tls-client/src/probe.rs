//! HTTPS probe: `GET` a URL while trusting exactly one CA bundle.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use common::{pem, PemError};
use http_body_util::{BodyExt, Empty};
use hyper::{StatusCode, Uri};
use hyper_util::{client::legacy::Client, rt::TokioExecutor};
use rustls::{crypto::ring, ClientConfig, RootCertStore};
use thiserror::Error;
use tracing::debug;

/// Why a probe failed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to load CA certificate")]
    Ca(#[from] PemError),

    #[error("invalid TLS client configuration")]
    Tls(#[from] rustls::Error),

    #[error("invalid URL {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: <Uri as FromStr>::Err,
    },

    #[error("request failed")]
    Request(#[from] hyper_util::client::legacy::Error),

    #[error("HTTP Error {}: {}", .0.as_u16(), .0.canonical_reason().unwrap_or("unknown"))]
    Status(StatusCode),

    #[error("failed to read response body")]
    Body(#[from] hyper::Error),

    #[error("response is not valid JSON")]
    Decode(#[from] serde_json::Error),
}

impl ProbeError {
    /// True when the server answered but the body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, ProbeError::Decode(_))
    }
}

/// Build a rustls client config whose only trust anchors are the
/// certificates in the PEM file at `ca_path`.
pub fn client_config(ca_path: &Path) -> Result<ClientConfig, ProbeError> {
    let mut roots = RootCertStore::empty();
    for cert in pem::read_certs(ca_path)? {
        roots.add(cert)?;
    }
    debug!(anchors = roots.len(), "CA bundle loaded");

    let config = ClientConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(config)
}

/// Parse `url` into a [`Uri`].
pub fn parse_url(url: &str) -> Result<Uri, ProbeError> {
    Uri::from_str(url).map_err(|source| ProbeError::InvalidUrl {
        url: url.to_owned(),
        source,
    })
}

/// `GET uri` over HTTPS and decode the body as JSON.
///
/// Any non-2xx status is an error, as is a body that is not JSON.
pub async fn fetch_json(tls: ClientConfig, uri: Uri) -> Result<serde_json::Value, ProbeError> {
    let https = hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_only()
        .enable_http1()
        .build();
    let client: Client<_, Empty<Bytes>> = Client::builder(TokioExecutor::new()).build(https);

    let resp = client.get(uri).await?;
    let status = resp.status();
    debug!(status = status.as_u16(), "response received");
    if !status.is_success() {
        return Err(ProbeError::Status(status));
    }

    let body = resp.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&body)?)
}

/// Render `value` the way the probe prints it: two-space indented JSON.
pub fn render(value: &serde_json::Value) -> Result<String, ProbeError> {
    Ok(serde_json::to_string_pretty(value)?)
}
