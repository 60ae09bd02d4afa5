//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CAREOPS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use careops::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod error;
mod realtime;
mod server;

pub use error::{ConfigError, ValidationError};
pub use realtime::{RealtimeConfig, MAX_CONNECTION_BUFFER};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// WebSocket fan-out and origin allow-list
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CAREOPS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CAREOPS__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CAREOPS__REALTIME__ALLOWED_ORIGINS=https://*.careops.app` -> `realtime.allowed_origins`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CAREOPS")
                    .separator("__"),
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
        self.server.validate()?;
        self.realtime.validate(self.server.environment)?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("CAREOPS__SERVER__PORT");
        env::remove_var("CAREOPS__SERVER__ENVIRONMENT");
        env::remove_var("CAREOPS__REALTIME__ALLOWED_ORIGINS");
        env::remove_var("CAREOPS__REALTIME__FRONTEND_URL");
        env::remove_var("CAREOPS__REALTIME__CONNECTION_BUFFER");
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.realtime.allowed_origins, "http://localhost:5173");
        assert_eq!(config.realtime.ws_path, "/ws");
        assert!(config.realtime.allow_credentials);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_realtime_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAREOPS__REALTIME__FRONTEND_URL", "https://app.careops.io");
        env::set_var("CAREOPS__REALTIME__CONNECTION_BUFFER", "16");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.realtime.connection_buffer, 16);
        assert_eq!(
            config.realtime.frontend_url.as_deref(),
            Some("https://app.careops.io")
        );
    }

    #[test]
    fn test_production_wildcard_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAREOPS__SERVER__ENVIRONMENT", "production");
        env::set_var("CAREOPS__REALTIME__ALLOWED_ORIGINS", "*");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::WildcardOriginInProduction)
        );
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CAREOPS__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(result.unwrap().server.port, 3000);
    }
}
