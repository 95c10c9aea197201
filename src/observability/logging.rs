//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Build the per-request span used by the HTTP trace layer
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level
//! - The API-key path segment never reaches the logs

use axum::body::Body;
use axum::http::Request;
use tracing::Span;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::{LogFormat, ObservabilityConfig};
use crate::http::request::redact_path;
use crate::lifecycle::StartupError;

/// Install the global subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.log_level)))
        .map_err(|e| StartupError::Logging(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = match config.log_format {
        LogFormat::Pretty => registry.with(fmt::layer()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    result.map_err(|e| StartupError::Logging(e.to_string()))
}

fn default_directives(level: &str) -> String {
    format!("ai_proxy={level},tower_http={level}", level = level)
}

/// Span opened for every inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %redact_path(request.uri().path()),
    )
}
