//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the root route and the proxy pipeline
//! - Wire up middleware (CORS, tracing, X-Accel-Buffering)
//! - Bind server to listener (plain TCP or TLS)
//! - Graceful shutdown on signal

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::ProxyConfig;
use crate::http::forward::Forwarder;
use crate::http::{pipeline, response};
use crate::lifecycle::StartupError;
use crate::net::tls::load_tls_config;
use crate::observability::logging::make_request_span;
use crate::routing::RouteTable;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Arc<str>,
    pub routes: Arc<RouteTable>,
    pub forwarder: Forwarder,
}

impl AppState {
    /// Build the immutable per-process state from a validated config.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, StartupError> {
        let routes = RouteTable::from_config(&config.routes)?;
        let forwarder = Forwarder::from_config(&config.upstream).map_err(StartupError::Client)?;

        Ok(Self {
            api_key: Arc::from(config.auth.api_key.as_str()),
            routes: Arc::new(routes),
            forwarder,
        })
    }
}

/// HTTP server for the AI proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        let state = AppState::from_config(&config)?;

        tracing::info!(
            routes = state.routes.entries().len(),
            deadline_ms = state.forwarder.deadline().as_millis() as u64,
            "Route table compiled"
        );

        let router = build_router(state);
        Ok(Self { router, config })
    }

    /// Run the server on an already bound listener until shutdown fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), StartupError> {
        let addr = listener.local_addr().map_err(StartupError::Bind)?;

        if let Some(tls) = &self.config.listener.tls {
            let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path))
                .await
                .map_err(StartupError::Tls)?;
            let std_listener = listener.into_std().map_err(StartupError::Bind)?;

            let handle = axum_server::Handle::new();
            let shutdown_handle = handle.clone();
            tokio::spawn(async move {
                let _ = shutdown.recv().await;
                shutdown_handle.graceful_shutdown(None);
            });

            tracing::info!(address = %addr, "HTTPS server starting");
            axum_server::from_tcp_rustls(std_listener, rustls)
                .handle(handle)
                .serve(self.router.into_make_service())
                .await
                .map_err(StartupError::Bind)?;
        } else {
            tracing::info!(address = %addr, "HTTP server starting");
            axum::serve(listener, self.router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown.recv().await;
                })
                .await
                .map_err(StartupError::Bind)?;
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .fallback(proxy_handler)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-accel-buffering"),
            HeaderValue::from_static("no"),
        ))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

async fn root_handler() -> &'static str {
    response::ROOT_BODY
}

/// Everything except `GET /` goes through the stage pipeline.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    pipeline::run(&state, request).await
}
