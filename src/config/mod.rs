// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{RelayError, Result};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

/// Environment variable holding the gateway credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`MEDCHAT_SERVER__PORT=8000`)
    /// 2. Config file (`explicit_path`, or `~/.medchat-relay/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let file = match explicit_path {
            Some(path) => File::from(path.to_path_buf()).required(true),
            None => File::with_name(&Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("MEDCHAT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| RelayError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| RelayError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".medchat-relay")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

/// Read the gateway API key from the process environment.
///
/// A missing or blank key is fatal: the server must not start without it.
pub fn api_key_from_env() -> Result<ApiKey> {
    std::env::var(API_KEY_ENV)
        .ok()
        .and_then(ApiKey::new)
        .ok_or_else(|| {
            RelayError::Config(format!(
                "{} is not set. Add it to your environment or .env file.",
                API_KEY_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9123\n\n[gateway]\ntimeout_seconds = 5\ntemperature = 0.2"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9123);
        assert_eq!(config.gateway.timeout_seconds, 5);
        assert_eq!(config.gateway.temperature, Some(0.2));
        // Untouched sections keep their defaults
        assert_eq!(config.gateway.max_tokens, 1000);
        assert_eq!(config.limits.max_image_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/medchat.toml")));
        assert!(matches!(result, Err(RelayError::Config(_))));
    }
}
