//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → auth.rs (API-key path segment)
//!     → Pass to routing
//!     → headers.rs (sanitize before forwarding)
//! Upstream response:
//!     → headers.rs (strip hop-by-hop)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject before any routing logic runs
//! - Caller-supplied upstream credentials are never rewritten

pub mod auth;
pub mod headers;

pub use auth::authenticate;
pub use headers::{sanitize, strip_hop_by_hop};
