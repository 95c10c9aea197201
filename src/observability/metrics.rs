//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define proxy metrics (requests, latency, upstream failures)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `proxy_requests_total` (counter): requests by method, route, status
//! - `proxy_request_duration_seconds` (histogram): time to response head
//! - `proxy_upstream_timeouts_total` (counter): deadline expiries by route
//! - `proxy_upstream_errors_total` (counter): transport failures by route
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed
//! - Labels are route segments, never full paths (paths carry the API key)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::lifecycle::StartupError;

/// Install the Prometheus recorder and its HTTP listener.
pub fn init_metrics(address: &str) -> Result<(), StartupError> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| StartupError::Metrics(format!("invalid metrics address '{}': {}", address, e)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| StartupError::Metrics(e.to_string()))?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("proxy_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_timeout(route: &str) {
    metrics::counter!("proxy_upstream_timeouts_total", "route" => route.to_string()).increment(1);
}

pub fn record_upstream_error(route: &str) {
    metrics::counter!("proxy_upstream_errors_total", "route" => route.to_string()).increment(1);
}
