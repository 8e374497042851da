//! Response body served on every request.
//!
//! The server and the probe client both speak this type: the server
//! serialises it, the client can decode it back.

use serde::{Deserialize, Serialize};

/// Fixed `message` value.
pub const HELLO_MESSAGE: &str = "Hello from TLS server";

/// Fixed `version` value.
pub const PROTOCOL_VERSION: &str = "1.0";

/// Body for every response: `{"message":"Hello from TLS server","version":"1.0"}`.
///
/// Built fresh per request and dropped once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
    pub version: String,
}

impl HelloResponse {
    pub fn new() -> Self {
        Self {
            message: HELLO_MESSAGE.into(),
            version: PROTOCOL_VERSION.into(),
        }
    }
}

impl Default for HelloResponse {
    fn default() -> Self {
        Self::new()
    }
}
