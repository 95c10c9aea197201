//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → pipeline.rs (ordered stages)
//!         → request.rs (API key, path remainder, hostname)
//!         → forward.rs (bounded or direct upstream call)
//!     → response.rs (relay upstream response, fixed responses)
//!     → Send to client
//! ```

pub mod error;
pub mod forward;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use error::ProxyError;
pub use forward::{Forwarder, OutboundRequest};
pub use pipeline::Flow;
pub use request::InboundTarget;
pub use server::{build_router, AppState, HttpServer};
