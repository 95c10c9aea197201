//! API-key authentication stage.

use subtle::ConstantTimeEq;

use crate::http::error::ProxyError;
use crate::http::request::InboundTarget;

/// Compare the first path segment with the configured secret.
pub fn authenticate(expected: &str, target: &InboundTarget) -> Result<(), ProxyError> {
    if !expected.is_empty() && keys_match(&target.api_key, expected) {
        Ok(())
    } else {
        tracing::warn!(path = %target.path, "Rejected request with invalid API key");
        Err(ProxyError::Unauthorized)
    }
}

// Length differences still return early; only the content comparison is
// constant-time.
fn keys_match(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
