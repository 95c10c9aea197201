//! Ordered request pipeline.
//!
//! # Data Flow
//! ```text
//! request
//!     → authenticate        (401 or continue)
//!     → custom_target       (respond or continue)
//!     → route_table         (respond or continue)
//!     → not_found
//! ```
//!
//! Every stage returns a terminal response or hands the request on; no stage
//! relies on an implicit "not handled" convention.

use std::time::Instant;

use axum::body::Body;
use axum::extract::Query;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use url::Url;

use crate::http::error::ProxyError;
use crate::http::forward::OutboundRequest;
use crate::http::request::InboundTarget;
use crate::http::response;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::upstream_url;
use crate::security::{authenticate, sanitize};

/// Remainder path served by the custom-target stage.
pub const CUSTOM_TARGET_PATH: &str = "/custom-model-proxy";

/// Result of a pipeline stage.
pub enum Flow {
    /// Stop here and send this response.
    Respond(Response),
    /// Not handled; pass the request to the next stage.
    Continue(Request<Body>),
}

/// Run every stage in order for a request that is not the root route.
pub async fn run(state: &AppState, request: Request<Body>) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let target = InboundTarget::from_request(&request);

    let (route, result) = dispatch(state, &target, request).await;
    let response = result.unwrap_or_else(IntoResponse::into_response);

    metrics::record_request(method.as_str(), response.status().as_u16(), route, start);
    response
}

async fn dispatch<'a>(
    state: &'a AppState,
    target: &InboundTarget,
    request: Request<Body>,
) -> (&'a str, Result<Response, ProxyError>) {
    if let Err(e) = authenticate(&state.api_key, target) {
        return ("none", Err(e));
    }

    let request = match custom_target(state, target, request).await {
        Ok(Flow::Respond(response)) => return ("custom", Ok(response)),
        Ok(Flow::Continue(request)) => request,
        Err(e) => return ("custom", Err(e)),
    };

    let (route, flow) = route_table(state, target, request).await;
    match flow {
        Ok(Flow::Respond(response)) => (route, Ok(response)),
        Ok(Flow::Continue(_)) => {
            tracing::debug!(path = %target.path, "No route matched");
            ("none", Ok(response::not_found()))
        }
        Err(e) => (route, Err(e)),
    }
}

#[derive(Debug, Deserialize)]
struct CustomTargetParams {
    url: String,
}

/// Parse and check the `url` query parameter: absolute http(s) with a host.
pub fn validate_custom_target(request: &Request<Body>) -> Result<Url, ProxyError> {
    let Query(params) = Query::<CustomTargetParams>::try_from_uri(request.uri())
        .map_err(|e| ProxyError::InvalidTarget(e.body_text()))?;

    let url = Url::parse(&params.url).map_err(|e| ProxyError::InvalidTarget(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || !url.has_host() {
        return Err(ProxyError::InvalidTarget(format!(
            "'{}' is not an absolute http(s) URL",
            params.url
        )));
    }
    Ok(url)
}

/// Forward verbatim to a caller-supplied URL: no rewriting, no header
/// sanitization, no deadline.
async fn custom_target(
    state: &AppState,
    target: &InboundTarget,
    request: Request<Body>,
) -> Result<Flow, ProxyError> {
    if target.path != CUSTOM_TARGET_PATH {
        return Ok(Flow::Continue(request));
    }

    let url = validate_custom_target(&request)?;
    tracing::debug!(upstream_host = url.host_str().unwrap_or_default(), "Forwarding to custom target");

    let (parts, body) = request.into_parts();
    let outbound = OutboundRequest {
        method: parts.method,
        url,
        headers: parts.headers,
        body,
    };
    state.forwarder.forward_direct(outbound).await.map(Flow::Respond)
}

/// Match, rewrite, sanitize and forward under the deadline.
async fn route_table<'a>(
    state: &'a AppState,
    target: &InboundTarget,
    request: Request<Body>,
) -> (&'a str, Result<Flow, ProxyError>) {
    let Some(entry) = state
        .routes
        .match_request(&target.path, target.hostname.as_deref())
    else {
        return ("none", Ok(Flow::Continue(request)));
    };
    let route = entry.path_segment();

    let url = match upstream_url(entry, &target.path, target.query.as_deref()) {
        Ok(url) => url,
        Err(e) => return (route, Err(ProxyError::InvalidTarget(e.to_string()))),
    };

    tracing::debug!(route, upstream_host = url.host_str().unwrap_or_default(), "Proxying request");

    let (parts, body) = request.into_parts();
    let outbound = OutboundRequest {
        method: parts.method,
        url,
        headers: sanitize(&parts.headers, entry.path_segment()),
        body,
    };
    let result = state
        .forwarder
        .forward_bounded(route, outbound)
        .await
        .map(Flow::Respond);
    (route, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_custom_target_accepts_absolute_url() {
        let url = validate_custom_target(&request(
            "/k/custom-model-proxy?url=https%3A%2F%2Fexample.com%2Fx%3Fa%3D1",
        ))
        .unwrap();
        assert_eq!(url.as_str(), "https://example.com/x?a=1");
    }

    #[test]
    fn test_custom_target_rejects_bad_urls() {
        for uri in [
            "/k/custom-model-proxy?url=not-a-url",
            "/k/custom-model-proxy?url=%2Frelative",
            "/k/custom-model-proxy?url=mailto%3Ame%40example.com",
            "/k/custom-model-proxy",
            "/k/custom-model-proxy?other=1",
        ] {
            assert!(
                matches!(validate_custom_target(&request(uri)), Err(ProxyError::InvalidTarget(_))),
                "{} should be rejected",
                uri
            );
        }
    }
}
