//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.
//!
//! Note that the backend base URL and credential are *not* stored here: only
//! the names of the sources they are read from. Their values are resolved per
//! request, see [`crate::config::sources`].

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Function prefix and credential header.
    pub gateway: GatewaySettings,

    /// Ordered source names for the backend base URL and credential.
    pub backend: BackendSources,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Request-shaping settings of the gateway itself.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Path prefix under which the function is mounted. Stripped from every
    /// inbound path to obtain the backend sub-path.
    pub function_prefix: String,

    /// Outbound header that carries the backend credential.
    pub credential_header: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            function_prefix: "/.netlify/functions/proxy".to_string(),
            credential_header: "x-api-key".to_string(),
        }
    }
}

/// Source names consulted, in order, for the backend settings.
/// The first source holding a non-empty value wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSources {
    pub base_url_sources: Vec<String>,
    pub credential_sources: Vec<String>,
}

impl Default for BackendSources {
    fn default() -> Self {
        Self {
            base_url_sources: vec![
                "BACKEND_BASE_URL".to_string(),
                "API_BASE_URL".to_string(),
                "VITE_API_BASE_URL".to_string(),
            ],
            credential_sources: vec![
                "MY_API_KEY".to_string(),
                "API_KEY".to_string(),
                "BACKEND_API_KEY".to_string(),
            ],
        }
    }
}

/// Timeout configuration for the outbound call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Deadline for the whole upstream exchange (send + buffered body) in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            upstream_secs: 30,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 6 * 1024 * 1024, // 6MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
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
