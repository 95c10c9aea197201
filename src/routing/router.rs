//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in configured order
//! - Look up the first matching route for a request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan (the table is small and order is significant)
//! - Explicit `None` rather than a silent default

use crate::config::RouteTableConfig;
use crate::routing::matcher::RouteEntry;

/// Error building the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTableError {
    pub path_segment: String,
    pub reason: String,
}

impl std::fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route '{}': {}", self.path_segment, self.reason)
    }
}

impl std::error::Error for RouteTableError {}

/// Ordered, immutable route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    /// Compile routes from configuration, preserving their order.
    pub fn from_config(config: &RouteTableConfig) -> Result<Self, RouteTableError> {
        let entries = config
            .iter()
            .map(|route| {
                RouteEntry::from_config(route).map_err(|reason| RouteTableError {
                    path_segment: route.path_segment.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(entries))
    }

    /// First entry whose segment prefixes `path` or whose alias equals
    /// `hostname`. `path` excludes the API-key segment.
    pub fn match_request(&self, path: &str, hostname: Option<&str>) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.matches(path, hostname))
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        let entries = RouteTableConfig::default()
            .iter()
            .filter_map(|route| RouteEntry::from_config(route).ok())
            .collect();
        Self::new(entries)
    }
}
