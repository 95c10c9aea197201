//! Inbound request inspection.
//!
//! # Responsibilities
//! - Split the API-key segment from the rest of the path
//! - Extract routing-relevant information (path remainder, query, hostname)
//! - Redact the API key for logging
//!
//! # Design Decisions
//! - The original request is not modified; only borrowed parts are read
//! - Hostname comes from the URI authority (HTTP/2) or the Host header

use axum::body::Body;
use axum::http::header::HOST;
use axum::http::Request;

/// Routing view of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundTarget {
    /// First path segment.
    pub api_key: String,
    /// Path after the API key, always starting with `/`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// Lower-cased hostname without port.
    pub hostname: Option<String>,
}

impl InboundTarget {
    pub fn from_request(req: &Request<Body>) -> Self {
        let (api_key, path) = split_api_key(req.uri().path());
        let hostname = req
            .uri()
            .host()
            .map(str::to_string)
            .or_else(|| {
                req.headers()
                    .get(HOST)
                    .and_then(|h| h.to_str().ok())
                    .map(str::to_string)
            })
            .map(|host| strip_port(&host).to_ascii_lowercase());

        Self {
            api_key,
            path,
            query: req.uri().query().map(str::to_string),
            hostname,
        }
    }
}

/// `/key/a/b` → (`key`, `/a/b`); `/key` → (`key`, `/`).
pub fn split_api_key(path: &str) -> (String, String) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    match trimmed.split_once('/') {
        Some((key, rest)) => (key.to_string(), format!("/{}", rest)),
        None => (trimmed.to_string(), "/".to_string()),
    }
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // [::1]:8080
        return rest.split(']').next().unwrap_or(rest);
    }
    host.rsplit_once(':')
        .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
        .map(|(name, _)| name)
        .unwrap_or(host)
}

/// Path with the API-key segment masked, safe to log.
pub fn redact_path(path: &str) -> String {
    let (key, rest) = split_api_key(path);
    if key.is_empty() {
        return path.to_string();
    }
    if rest == "/" && !path.ends_with('/') {
        return "/***".to_string();
    }
    format!("/***{}", rest)
}
