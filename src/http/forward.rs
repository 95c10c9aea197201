//! Outbound forwarding.
//!
//! # Responsibilities
//! - Issue the upstream call with the inbound body streamed, not buffered
//! - Bound route-table calls by the request deadline
//! - Convert our own deadline expiry into the 504 response
//! - Forward custom-target calls without a deadline
//!
//! # Design Decisions
//! - One shared `reqwest::Client`; pooling is whatever the client provides
//! - The deadline covers the call up to the response head; the body then
//!   streams for as long as the upstream keeps it open
//! - Transport errors propagate unchanged as `ProxyError::Upstream`

use std::time::{Duration, Instant};

use axum::body::{Body, HttpBody};
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::error::ProxyError;
use crate::http::response;
use crate::observability::metrics;
use crate::resilience::{bounded, Bounded};

/// A request ready to be sent upstream.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Body,
}

/// Shared outbound client plus the route-table deadline.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: reqwest::Client,
    deadline: Duration,
}

impl Forwarder {
    pub fn new(client: reqwest::Client, deadline: Duration) -> Self {
        Self { client, deadline }
    }

    /// Build the client from upstream settings.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self::new(
            client,
            Duration::from_millis(config.request_timeout_ms),
        ))
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Forward a route-table request under the deadline.
    ///
    /// Expiry yields `504 Request timeout`; every other failure is returned
    /// as an error for the top-level handler.
    pub async fn forward_bounded(
        &self,
        route: &str,
        outbound: OutboundRequest,
    ) -> Result<Response, ProxyError> {
        let start = Instant::now();
        let url = outbound.url.clone();
        let call = self.build(outbound).send();

        match bounded(self.deadline, call).await {
            Bounded::Completed(Ok(upstream)) => {
                tracing::debug!(
                    route,
                    status = upstream.status().as_u16(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream responded"
                );
                Ok(response::from_upstream(upstream))
            }
            Bounded::Completed(Err(e)) => {
                metrics::record_upstream_error(route);
                Err(ProxyError::Upstream(e))
            }
            Bounded::TimedOut => {
                tracing::warn!(
                    route,
                    upstream = %redact_query(&url),
                    deadline_ms = self.deadline.as_millis() as u64,
                    "Upstream request timed out"
                );
                metrics::record_upstream_timeout(route);
                Ok(response::timeout())
            }
        }
    }

    /// Forward a request as-is, without a deadline.
    pub async fn forward_direct(&self, outbound: OutboundRequest) -> Result<Response, ProxyError> {
        let upstream = self.build(outbound).send().await.map_err(|e| {
            metrics::record_upstream_error("custom");
            ProxyError::Upstream(e)
        })?;
        Ok(response::from_upstream(upstream))
    }

    fn build(&self, outbound: OutboundRequest) -> reqwest::RequestBuilder {
        let OutboundRequest {
            method,
            url,
            headers,
            body,
        } = outbound;

        let builder = self.client.request(method, url).headers(headers);
        if body.size_hint().exact() == Some(0) {
            builder
        } else {
            builder.body(reqwest::Body::wrap_stream(body.into_data_stream()))
        }
    }
}

// Query strings may carry provider keys (e.g. `?key=`).
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}
