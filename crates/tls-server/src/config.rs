//! Command-line configuration for the server.
//!
//! Three flags, each with a default. File contents are not checked here;
//! rustls validates the certificate and key when they are loaded.

use std::net::{Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Server configuration parsed from the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "tls-server", version, about = "HTTPS server returning a fixed JSON payload")]
pub struct Config {
    /// Path to the PEM-encoded TLS certificate chain.
    #[arg(long = "cert", default_value = "server.crt")]
    pub cert_path: PathBuf,

    /// Path to the PEM-encoded TLS private key.
    #[arg(long = "key", default_value = "server.key")]
    pub key_path: PathBuf,

    /// Port to listen on.
    #[arg(long, default_value_t = 443)]
    pub port: u16,
}

impl Config {
    /// Address the listener binds: the IPv6 unspecified address on
    /// [`Config::port`]. With the OS default of `IPV6_V6ONLY` off (Linux,
    /// macOS) the socket is dual-stack and also accepts IPv4 clients.
    pub fn listen_addr(&self) -> SocketAddr {
        (Ipv6Addr::UNSPECIFIED, self.port).into()
    }
}
