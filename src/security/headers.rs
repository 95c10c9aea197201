//! Header manipulation.
//!
//! # Responsibilities
//! - Sanitize inbound headers before they are forwarded to a route target
//! - Strip hop-by-hop headers from upstream responses
//!
//! # Design Decisions
//! - Caller credentials pass through untouched; nothing is injected
//! - `content-length` and `host` are recomputed by the outbound client
//! - Only the Anthropic route drops `origin`

use axum::http::header::{CONTENT_LENGTH, HOST, ORIGIN};
use axum::http::HeaderMap;

/// Route segment whose upstream rejects browser `origin` headers.
const ORIGIN_STRIPPED_SEGMENT: &str = "anthropic";

/// Outbound header set for a route-table request.
pub fn sanitize(headers: &HeaderMap, matched_segment: &str) -> HeaderMap {
    let mut out = headers.clone();
    out.remove(CONTENT_LENGTH);
    out.remove(HOST);
    if matched_segment == ORIGIN_STRIPPED_SEGMENT {
        out.remove(ORIGIN);
    }
    out
}

fn is_hop_by_hop_header(name_lower: &str) -> bool {
    matches!(
        name_lower,
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn connection_tokens(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("connection")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|s| s.split(','))
        .map(|t| t.trim().to_ascii_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Upstream response headers minus connection-scoped ones; the listener
/// frames the relayed body itself.
pub fn strip_hop_by_hop(src: &HeaderMap) -> HeaderMap {
    let extra = connection_tokens(src);
    let mut out = HeaderMap::with_capacity(src.len());
    for (name, value) in src.iter() {
        let name_lower = name.as_str();
        if is_hop_by_hop_header(name_lower) || extra.iter().any(|t| t == name_lower) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}
