//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive `Deserialize` for loading from config files.

use serde::Deserialize;

/// Root configuration for the AI proxy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Caller authentication.
    pub auth: AuthConfig,

    /// Outbound call settings.
    pub upstream: UpstreamConfig,

    /// Ordered route table. First match wins.
    pub routes: RouteTableConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Caller authentication.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Secret expected as the first path segment of every proxied request.
    /// Usually supplied through the `API_KEY` environment variable.
    pub api_key: String,
}

/// Outbound call settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Deadline for route-table calls, up to the upstream response head.
    pub request_timeout_ms: u64,

    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Honor HTTP_PROXY / HTTPS_PROXY / NO_PROXY for outbound calls.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 60_000,
            connect_timeout_secs: 10,
            use_system_proxy: true,
        }
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    /// Path segment matched after the API key, without surrounding slashes.
    /// May itself contain slashes (e.g. `openrouter/api`).
    pub path_segment: String,

    /// Upstream base URL (scheme + host, optional base path, no trailing slash).
    pub target: String,

    /// Hostname that selects this route regardless of path.
    #[serde(default)]
    pub hostname: Option<String>,
}

impl RouteConfig {
    pub fn new(path_segment: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path_segment: path_segment.into(),
            target: target.into(),
            hostname: None,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }
}

/// Ordered list of routes. Defaults to the built-in provider table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RouteTableConfig(pub Vec<RouteConfig>);

impl RouteTableConfig {
    pub fn iter(&self) -> std::slice::Iter<'_, RouteConfig> {
        self.0.iter()
    }
}

impl Default for RouteTableConfig {
    fn default() -> Self {
        // `openrouter/api` must stay ahead of `openrouter`.
        Self(vec![
            RouteConfig::new("generativelanguage", "https://generativelanguage.googleapis.com")
                .with_hostname("gooai.chatkit.app"),
            RouteConfig::new("groq", "https://api.groq.com"),
            RouteConfig::new("anthropic", "https://api.anthropic.com"),
            RouteConfig::new("pplx", "https://api.perplexity.ai"),
            RouteConfig::new("openai", "https://api.openai.com"),
            RouteConfig::new("mistral", "https://api.mistral.ai"),
            RouteConfig::new("openrouter/api", "https://openrouter.ai/api"),
            RouteConfig::new("openrouter", "https://openrouter.ai/api"),
            RouteConfig::new("xai", "https://api.x.ai"),
        ])
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
