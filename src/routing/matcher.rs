//! Route matching logic.
//!
//! # Responsibilities
//! - Match the path segment that follows the API key
//! - Match the hostname alias of an entry
//! - Combine conditions with OR semantics
//!
//! # Design Decisions
//! - The segment must be followed by `/`, so `openai2` never matches `openai`
//! - Hostname comparison is exact against the lower-cased request hostname
//! - No regex; literal prefix comparison only

use crate::config::RouteConfig;
use crate::config::validation::check_target;

/// A compiled, immutable route table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    path_segment: String,
    /// `/` + segment + `/`, precomputed for matching.
    segment_prefix: String,
    target_base: String,
    hostname: Option<String>,
}

impl RouteEntry {
    /// Compile an entry. The target must be an absolute http(s) URL.
    pub fn new(
        path_segment: impl Into<String>,
        target: &str,
        hostname: Option<String>,
    ) -> Result<Self, String> {
        let path_segment = path_segment.into();
        check_target(target)?;
        Ok(Self {
            segment_prefix: format!("/{}/", path_segment),
            path_segment,
            target_base: target.to_string(),
            hostname: hostname.map(|h| h.to_ascii_lowercase()),
        })
    }

    pub fn from_config(config: &RouteConfig) -> Result<Self, String> {
        Self::new(
            config.path_segment.clone(),
            &config.target,
            config.hostname.clone(),
        )
    }

    pub fn path_segment(&self) -> &str {
        &self.path_segment
    }

    /// The target exactly as configured, used as the upstream URL prefix.
    pub fn target_base(&self) -> &str {
        &self.target_base
    }

    /// `path` is the request path with the API-key segment already removed.
    pub fn matches(&self, path: &str, hostname: Option<&str>) -> bool {
        self.matches_path(path) || self.matches_hostname(hostname)
    }

    fn matches_path(&self, path: &str) -> bool {
        path.starts_with(&self.segment_prefix)
    }

    fn matches_hostname(&self, hostname: Option<&str>) -> bool {
        match (self.hostname.as_deref(), hostname) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}
