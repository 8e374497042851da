//! Common types, PEM loading, and errors shared across the `tls-server` workspace crates.

pub mod error;
pub mod pem;
pub mod protocol;

pub use error::PemError;
pub use protocol::HelloResponse;
