//! Configuration data structures for the medchat relay.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream LLM gateway, input limits, and logging.
//! The API key is deliberately kept out of this tree; see [`ApiKey`].
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream chat-completions API settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Size limits applied to inbound requests.
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `0.0.0.0`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `5000`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to gzip HTTP responses.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enable_compression: bool,
}

/// Settings for the upstream LLM gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Full URL of the chat-completions endpoint.
    /// Default: Groq's OpenAI-compatible endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model used for text questions and as the first image variant.
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Second model queried for image questions.
    #[serde(default = "default_secondary_model")]
    pub secondary_model: String,

    /// `max_tokens` sent with every completion request.
    /// Default: `1000`
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature. Omitted from the request when unset.
    #[serde(default)]
    pub temperature: Option<f32>,

    /// Whole-request timeout in seconds. There are no retries.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Inbound size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted decoded image.
    /// Default: 10 MiB
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Largest accepted HTTP request body. Must leave room for base64
    /// and multipart overhead on top of `max_image_bytes`.
    /// Default: 16 MiB
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Bearer credential for the gateway. Wiped from memory on drop and never
/// printed by `Debug`.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accepts any non-blank value. Surrounding whitespace is dropped.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            enable_compression: true,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            primary_model: default_primary_model(),
            secondary_model: default_secondary_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

// Helper functions for serde defaults
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_primary_model() -> String {
    "meta-llama/llama-4-scout-17b-16e-instruct".to_string()
}

fn default_secondary_model() -> String {
    "meta-llama/llama-4-maverick-17b-128e-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout() -> u64 {
    30
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
