//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps
//! gateway credentials out of log sinks when upstream bodies are logged.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Replaces credentials found in `input` with placeholders.
///
/// Two shapes are scrubbed: Groq API keys (`gsk_...`) and anything following
/// a `Bearer ` prefix. Every occurrence is replaced, not just the first.
pub fn sanitize(input: &str) -> String {
    let scrubbed = redact_after(input, "gsk_", "[REDACTED_API_KEY]", true);
    redact_after(&scrubbed, "Bearer ", "[REDACTED_TOKEN]", false)
}

/// Redact every token starting at `marker`. When `include_marker` is false the
/// marker itself is kept and only what follows it is replaced.
fn redact_after(input: &str, marker: &str, placeholder: &str, include_marker: bool) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        let token_start = pos + marker.len();
        let token_len = rest[token_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
            .unwrap_or(rest.len() - token_start);

        let token_end = token_start + token_len;
        let token = &rest[token_start..token_end];

        result.push_str(&rest[..pos]);
        if token.is_empty() || token.starts_with('[') {
            result.push_str(&rest[pos..token_end]);
        } else {
            if !include_marker {
                result.push_str(marker);
            }
            result.push_str(placeholder);
        }
        rest = &rest[token_end..];
    }

    result.push_str(rest);
    result
}
