//! TLS accept loop.
//!
//! Startup happens in two steps, in this order:
//! 1. Load the certificate/key pair. Nothing is bound if this fails.
//! 2. Bind the TCP listener.
//!
//! After that, [`Server::run`] accepts connections until the process is
//! killed. Each connection gets its own task which performs the TLS handshake
//! and then serves HTTP/1.1 or HTTP/2 over the encrypted stream. A failure on
//! one connection is logged and affects no other.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, error, info};

use super::{router, tls};

/// First sleep after a failed `accept()`.
const ACCEPT_BACKOFF_MIN: Duration = Duration::from_millis(5);
/// Upper bound on the sleep between repeated `accept()` failures.
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// Fatal error while bringing the server up.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The certificate or key could not be loaded.
    #[error("failed to load TLS identity")]
    Identity(#[from] tls::IdentityError),

    /// The listening socket could not be bound (port in use, no privilege, ...).
    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

/// A bound HTTPS server that has not started accepting yet.
pub struct Server {
    listener: TcpListener,
    acceptor: TlsAcceptor,
    router: Router,
}

impl Server {
    /// Load the TLS identity, then bind `addr`.
    ///
    /// # Errors
    ///
    /// [`StartupError::Identity`] if the certificate or key is unusable; in
    /// that case no socket has been bound. [`StartupError::Bind`] if the
    /// address cannot be bound.
    pub async fn bind(
        cert_path: &Path,
        key_path: &Path,
        addr: SocketAddr,
    ) -> Result<Self, StartupError> {
        let tls_config = tls::load_server_config(cert_path, key_path)?;
        debug!(cert = %cert_path.display(), key = %key_path.display(), "TLS identity loaded");

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;

        Ok(Self {
            listener,
            acceptor: TlsAcceptor::from(tls_config),
            router: router::build(),
        })
    }

    /// Address the listener is actually bound to (useful when binding port 0).
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections forever, serving each on its own task.
    ///
    /// Only returns if the process is torn down. Accept errors (e.g. `EMFILE`)
    /// are logged and retried after an exponential backoff, reset by the next
    /// successful accept.
    pub async fn run(self) {
        match self.listener.local_addr() {
            Ok(addr) => info!(addr = %addr, "listening"),
            Err(e) => info!(error = %e, "listening on unknown address"),
        }

        let mut backoff = AcceptBackoff::default();
        loop {
            match self.listener.accept().await {
                Ok((tcp_stream, peer_addr)) => {
                    backoff.reset();
                    debug!(%peer_addr, "accepted TCP connection");
                    let acceptor = self.acceptor.clone();
                    let router = self.router.clone();
                    tokio::spawn(async move {
                        handle_connection(tcp_stream, peer_addr, acceptor, router).await;
                    });
                }
                Err(e) => {
                    let delay = backoff.next_delay();
                    error!(error = %e, retry_in_ms = delay.as_millis() as u64, "accept error");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Sleep schedule for consecutive `accept()` failures: 5ms, doubling, capped at 1s.
#[derive(Debug, Default)]
struct AcceptBackoff {
    current: Option<Duration>,
}

impl AcceptBackoff {
    fn next_delay(&mut self) -> Duration {
        let delay = match self.current {
            None => ACCEPT_BACKOFF_MIN,
            Some(d) => (d * 2).min(ACCEPT_BACKOFF_MAX),
        };
        self.current = Some(delay);
        delay
    }

    fn reset(&mut self) {
        self.current = None;
    }
}

/// Complete the TLS handshake on `tcp` and serve HTTP until the peer is done.
async fn handle_connection(
    tcp: TcpStream,
    peer_addr: SocketAddr,
    acceptor: TlsAcceptor,
    router: Router,
) {
    let tls_stream = match acceptor.accept(tcp).await {
        Ok(s) => s,
        Err(e) => {
            debug!(%peer_addr, error = %e, "TLS handshake failed");
            return;
        }
    };

    let alpn = tls_stream
        .get_ref()
        .1
        .alpn_protocol()
        .map(|p| String::from_utf8_lossy(p).into_owned());
    debug!(%peer_addr, alpn = alpn.as_deref().unwrap_or("none"), "TLS session established");

    let service = TowerToHyperService::new(router);
    if let Err(e) = auto::Builder::new(TokioExecutor::new())
        .serve_connection(TokioIo::new(tls_stream), service)
        .await
    {
        debug!(%peer_addr, error = %e, "connection closed with error");
    }
}
