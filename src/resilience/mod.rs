//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Route-table request to upstream:
//!     → timeouts.rs (race the call against the request deadline)
//!     → Completed(result) or TimedOut
//! ```
//!
//! # Design Decisions
//! - Every route-table call has a deadline; the custom-target route has none
//! - No retries: request bodies are streamed and cannot be replayed

pub mod timeouts;

pub use timeouts::{bounded, Bounded};
