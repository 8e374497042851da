//! Axum HTTPS server, routing, and the TLS accept loop.
//!
//! # Responsibilities
//! - Load the certificate/key pair into a rustls `ServerConfig`.
//! - Define the Axum router with its single catch-all handler.
//! - Accept TCP connections, complete the TLS handshake, and serve HTTP on each.

pub mod handlers;
pub mod listener;
pub mod router;
pub mod tls;
