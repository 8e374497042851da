//! Axum request handler for the single catch-all endpoint.

use axum::{http::StatusCode, response::IntoResponse, Json};
use common::HelloResponse;

/// Any method, any path — `200 OK` with the fixed JSON document.
///
/// The request (headers, body) is never inspected.
pub async fn hello() -> impl IntoResponse {
    (StatusCode::OK, Json(HelloResponse::new()))
}
