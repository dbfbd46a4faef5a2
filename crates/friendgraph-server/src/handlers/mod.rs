//! HTTP handler modules for the friendgraph API.
//!
//! Each sub-module implements thin handlers that decode the raw body, take
//! the service lock, delegate to [`GraphService`](crate::service::GraphService)
//! and answer in plain text. No graph logic lives in handlers.

pub mod friends;
pub mod users;

use axum::http::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Decodes a JSON request body.
///
/// Bodies are read as raw bytes rather than through `axum::Json` so that a
/// malformed body maps to [`ApiError::Decode`] regardless of content type.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    Ok(serde_json::from_slice(body)?)
}

/// Answers any method a route does not accept: `400` with no body.
pub async fn wrong_method() -> StatusCode {
    StatusCode::BAD_REQUEST
}

/// Liveness probe.
///
/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
