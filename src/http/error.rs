//! Request-scoped errors and their HTTP rendering.
//!
//! Timeouts are not represented here: the bounded forwarder turns them into a
//! 504 response itself.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub const UNAUTHORIZED_BODY: &str = "Unauthorized: Invalid API key";

#[derive(Debug, Error)]
pub enum ProxyError {
    /// API-key segment missing or wrong.
    #[error("Unauthorized: Invalid API key")]
    Unauthorized,

    /// Caller-supplied or derived upstream URL is not usable.
    #[error("invalid target url: {0}")]
    InvalidTarget(String),

    /// Any failure contacting the upstream other than our own deadline.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY).into_response(),
            ProxyError::InvalidTarget(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": { "message": message },
                })),
            )
                .into_response(),
            ProxyError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream error");
                (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
            }
        }
    }
}
