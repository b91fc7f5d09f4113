//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SESSION_SCHEDULE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use session_schedule::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Querying {}", config.cms.endpoint);
//! ```

mod cms;
mod error;
mod logging;

pub use cms::CmsConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LogConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// CMS content API configuration
    pub cms: CmsConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SESSION_SCHEDULE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SESSION_SCHEDULE__CMS__ENDPOINT=...` -> `cms.endpoint = ...`
    /// - `SESSION_SCHEDULE__LOG__JSON=true` -> `log.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SESSION_SCHEDULE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.cms.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "SESSION_SCHEDULE__CMS__ENDPOINT",
            "https://edge.example.com/api/graphql/v1",
        );
        env::set_var("SESSION_SCHEDULE__CMS__API_KEY", "token-123");
    }

    fn clear_env() {
        env::remove_var("SESSION_SCHEDULE__CMS__ENDPOINT");
        env::remove_var("SESSION_SCHEDULE__CMS__API_KEY");
        env::remove_var("SESSION_SCHEDULE__CMS__TIMEOUT_SECS");
        env::remove_var("SESSION_SCHEDULE__LOG__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.cms.endpoint, "https://edge.example.com/api/graphql/v1");
        assert_eq!(config.cms.api_key.as_deref(), Some("token-123"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.cms.token_header, "X-GQL-Token");
        assert_eq!(config.cms.timeout_secs, 30);
        assert!(!config.log.json);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SESSION_SCHEDULE__CMS__TIMEOUT_SECS", "5");
        env::set_var("SESSION_SCHEDULE__LOG__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.cms.timeout_secs, 5);
        assert!(config.log.json);
    }

    #[test]
    fn test_missing_endpoint_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_err());
    }
}
