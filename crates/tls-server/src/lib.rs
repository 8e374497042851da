//! `tls-server` — terminate TLS and answer every HTTP request with
//! `{"message":"Hello from TLS server","version":"1.0"}`.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so the probe client's tests can stand up a real listener.

pub mod config;
pub mod server;
pub mod telemetry;

pub use config::Config;
pub use server::listener::{Server, StartupError};
