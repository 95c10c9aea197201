//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require the API key before the process starts serving
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect routes that can never match by path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::{ProxyConfig, RouteConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingApiKey,
    InvalidBindAddress(String),
    InvalidMetricsAddress(String),
    ZeroRequestTimeout,
    EmptyPathSegment { index: usize },
    SlashAroundPathSegment { segment: String },
    InvalidTarget { segment: String, reason: String },
    ShadowedRoute { segment: String, shadowed_by: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingApiKey => {
                write!(f, "API key is not set (use the API_KEY environment variable)")
            }
            ValidationError::InvalidBindAddress(addr) => write!(f, "invalid bind address '{}'", addr),
            ValidationError::InvalidMetricsAddress(addr) => {
                write!(f, "invalid metrics address '{}'", addr)
            }
            ValidationError::ZeroRequestTimeout => write!(f, "upstream.request_timeout_ms must be > 0"),
            ValidationError::EmptyPathSegment { index } => {
                write!(f, "route #{} has an empty path_segment", index)
            }
            ValidationError::SlashAroundPathSegment { segment } => {
                write!(f, "route '{}' path_segment must not start or end with '/'", segment)
            }
            ValidationError::InvalidTarget { segment, reason } => {
                write!(f, "route '{}' has an invalid target: {}", segment, reason)
            }
            ValidationError::ShadowedRoute { segment, shadowed_by } => write!(
                f,
                "route '{}' is unreachable by path because '{}' is listed before it",
                segment, shadowed_by
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a fully assembled configuration (file + environment overrides).
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.upstream.request_timeout_ms == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let routes: Vec<&RouteConfig> = config.routes.iter().collect();
    for (index, route) in routes.iter().enumerate() {
        validate_route(index, route, &mut errors);
    }
    detect_shadowed_routes(&routes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(index: usize, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let segment = &route.path_segment;
    if segment.is_empty() {
        errors.push(ValidationError::EmptyPathSegment { index });
    } else if segment.starts_with('/') || segment.ends_with('/') {
        errors.push(ValidationError::SlashAroundPathSegment {
            segment: segment.clone(),
        });
    }

    if let Err(reason) = check_target(&route.target) {
        errors.push(ValidationError::InvalidTarget {
            segment: segment.clone(),
            reason,
        });
    }
}

/// The target is concatenated with the rewritten path, so it must be an
/// absolute http(s) URL without a trailing slash, query or fragment.
pub(crate) fn check_target(target: &str) -> Result<(), String> {
    let url = Url::parse(target).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if !url.has_host() {
        return Err("missing host".to_string());
    }
    if target.ends_with('/') {
        return Err("trailing '/'".to_string());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err("query and fragment are not allowed".to_string());
    }
    Ok(())
}

// Any path starting with "/b/" also starts with "/a/" when b == a or b starts
// with "a/". A hostname alias keeps the later entry reachable.
fn detect_shadowed_routes(routes: &[&RouteConfig], errors: &mut Vec<ValidationError>) {
    for (j, later) in routes.iter().enumerate() {
        if later.hostname.is_some() || later.path_segment.is_empty() {
            continue;
        }
        let earlier = routes[..j].iter().find(|earlier| {
            !earlier.path_segment.is_empty()
                && (later.path_segment == earlier.path_segment
                    || later
                        .path_segment
                        .starts_with(&format!("{}/", earlier.path_segment)))
        });
        if let Some(earlier) = earlier {
            errors.push(ValidationError::ShadowedRoute {
                segment: later.path_segment.clone(),
                shadowed_by: earlier.path_segment.clone(),
            });
        }
    }
}
