//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Root configuration for the member groups service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// HTTP API settings.
    pub http: HttpConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// Text catalog used for user-facing notifications.
    pub localization: LocalizationConfig,

    /// Groups loaded into the in-memory stores at startup.
    pub seed: SeedConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
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

/// HTTP API configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Path prefix for the member group routes.
    pub base_path: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_path: "/api/member-groups".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
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

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
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
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}

/// Localization configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Culture of the configured texts (e.g., "en-US").
    pub culture: String,

    /// `area/alias` → text overrides.
    pub texts: HashMap<String, String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            culture: "en-US".to_string(),
            texts: HashMap::new(),
        }
    }
}

/// Startup seed data.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SeedConfig {
    pub groups: Vec<SeedGroup>,
}

/// One seeded member group.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SeedGroup {
    /// Integer id shared by both stores.
    pub id: i32,

    /// GUID key; generated when omitted.
    #[serde(default)]
    pub key: Option<Uuid>,

    pub name: String,

    #[serde(default = "default_creator_id")]
    pub creator_id: i32,

    /// Create the identity role.
    #[serde(default = "default_true")]
    pub role: bool,

    /// Create the legacy group record.
    #[serde(default = "default_true")]
    pub legacy: bool,
}

fn default_creator_id() -> i32 {
    -1
}

fn default_true() -> bool {
    true
}
