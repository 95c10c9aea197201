//! Response construction.
//!
//! # Responsibilities
//! - Relay upstream responses to the client (status, headers, streamed body)
//! - Build the fixed responses the proxy answers with itself
//!
//! # Design Decisions
//! - Streaming responses avoid buffering the entire body
//! - Hop-by-hop headers stripped; everything else relayed verbatim
//! - Deadline expiry results in 504 Gateway Timeout

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::security::strip_hop_by_hop;

pub const TIMEOUT_BODY: &str = "Request timeout";
pub const NOT_FOUND_BODY: &str = "404 Not Found";
pub const ROOT_BODY: &str = "A proxy for AI! Use /{api_key}/{provider} to access the API.";

/// Convert an upstream response into a client response without buffering.
pub fn from_upstream(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = strip_hop_by_hop(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Synthesized when the route-table deadline fires.
pub fn timeout() -> Response {
    (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_BODY).into_response()
}

/// No route matched and the path is not the custom-target route.
pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, NOT_FOUND_BODY).into_response()
}
