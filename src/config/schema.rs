//! Configuration schema definitions.
//!
//! The gateway file is deserialized into [`GatewayConfig`]. Plugin sections
//! stay untyped under `extra_config` until the plugin itself validates them
//! into an [`ExceptionConfig`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::exceptions::Dialect;

/// Root configuration for the demonstration gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Downstream validation stage settings.
    pub validation: ValidationConfig,

    /// Per-plugin configuration, keyed by registered plugin name.
    pub extra_config: Map<String, Value>,
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

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Validation stage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Header a request must carry unless it bypasses validation.
    pub required_header: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            required_header: "authorization".to_string(),
        }
    }
}

/// Typed form of the exception plugin's section.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExceptionConfig {
    /// Token syntax of the templates.
    pub dialect: Dialect,

    /// Exception templates, in configuration order.
    pub exceptions: Vec<String>,
}
