//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (path after API key, hostname)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (segment prefix or hostname alias)
//!     → rewrite.rs (strip segment, build upstream URL)
//!     → Return: matched RouteEntry + upstream URL, or no match
//!
//! Route compilation (at startup):
//!     RouteTableConfig
//!     → Compile entries (parse targets, precompute prefixes)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (literal prefix matching only)
//! - Deterministic: same input always matches same route
//! - First match wins in configured order; no longest-prefix rule

pub mod matcher;
pub mod rewrite;
pub mod router;

pub use matcher::RouteEntry;
pub use rewrite::{rewrite_path, upstream_url};
pub use router::{RouteTable, RouteTableError};
