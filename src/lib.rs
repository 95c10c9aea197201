//! Single-tenant reverse proxy for AI provider APIs.
//!
//! Requests arrive as `/{api_key}/{provider}/...`, are authenticated against a
//! static key, matched against an ordered route table and forwarded to the
//! provider with the key and provider segments stripped.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod resilience;
pub mod routing;
pub mod security;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
