//! Real-time transport configuration

use serde::Deserialize;

use crate::domain::realtime::OriginPolicy;

use super::error::ValidationError;
use super::server::Environment;

pub const MAX_CONNECTION_BUFFER: usize = 4096;

/// WebSocket fan-out and origin allow-list settings.
///
/// The same origin policy guards the WebSocket handshake and the HTTP CORS
/// layer.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeConfig {
    /// Allowed origins (comma-separated). Entries are exact origins,
    /// `scheme://*.domain` wildcards, or `*`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,

    /// Deployed frontend origin, appended to the allow-list
    pub frontend_url: Option<String>,

    /// Whether browsers may send credentials cross-origin
    #[serde(default = "default_allow_credentials")]
    pub allow_credentials: bool,

    /// Outbound queue capacity per connection
    #[serde(default = "default_connection_buffer")]
    pub connection_buffer: usize,

    /// Path the WebSocket endpoint is mounted on
    #[serde(default = "default_ws_path")]
    pub ws_path: String,
}

impl RealtimeConfig {
    /// Allow-list entries with the frontend URL folded in.
    pub fn origin_entries(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .chain(self.frontend_url.as_deref())
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn origin_policy(&self) -> Result<OriginPolicy, ValidationError> {
        OriginPolicy::from_entries(self.origin_entries())
            .map_err(|e| ValidationError::InvalidOrigin(e.to_string()))
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if !(1..=MAX_CONNECTION_BUFFER).contains(&self.connection_buffer) {
            return Err(ValidationError::InvalidConnectionBuffer(self.connection_buffer));
        }
        if !self.ws_path.starts_with('/') {
            return Err(ValidationError::InvalidWsPath(self.ws_path.clone()));
        }

        let policy = self.origin_policy()?;
        if environment == Environment::Production {
            if policy.patterns().is_empty() {
                return Err(ValidationError::EmptyOriginsInProduction);
            }
            if policy.is_open() {
                return Err(ValidationError::WildcardOriginInProduction);
            }
        }
        Ok(())
    }
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            frontend_url: None,
            allow_credentials: default_allow_credentials(),
            connection_buffer: default_connection_buffer(),
            ws_path: default_ws_path(),
        }
    }
}

fn default_allowed_origins() -> String {
    "http://localhost:5173".to_string()
}

fn default_allow_credentials() -> bool {
    true
}

fn default_connection_buffer() -> usize {
    64
}

fn default_ws_path() -> String {
    "/ws".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_url_joins_the_allow_list() {
        let config = RealtimeConfig {
            allowed_origins: "http://localhost:5173, ,https://*.careops.app".to_string(),
            frontend_url: Some("https://careops.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.origin_entries(),
            vec![
                "http://localhost:5173",
                "https://*.careops.app",
                "https://careops.example.com/"
            ]
        );

        let policy = config.origin_policy().unwrap();
        assert!(policy.allows(Some("https://careops.example.com")));
        assert!(policy.allows(Some("https://eu.careops.app")));
        assert!(!policy.allows(Some("https://evil.example")));
    }

    #[test]
    fn defaults_are_valid_everywhere() {
        let config = RealtimeConfig::default();
        assert!(config.validate(Environment::Development).is_ok());
        assert!(config.validate(Environment::Production).is_ok());
    }

    #[test]
    fn buffer_bounds_are_enforced() {
        for buffer in [0, MAX_CONNECTION_BUFFER + 1] {
            let config = RealtimeConfig {
                connection_buffer: buffer,
                ..Default::default()
            };
            assert_eq!(
                config.validate(Environment::Development),
                Err(ValidationError::InvalidConnectionBuffer(buffer))
            );
        }
    }

    #[test]
    fn ws_path_must_be_absolute() {
        let config = RealtimeConfig {
            ws_path: "ws".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(Environment::Development),
            Err(ValidationError::InvalidWsPath(_))
        ));
    }

    #[test]
    fn production_rejects_open_policies() {
        let wildcard = RealtimeConfig {
            allowed_origins: "*".to_string(),
            ..Default::default()
        };
        assert!(wildcard.validate(Environment::Development).is_ok());
        assert_eq!(
            wildcard.validate(Environment::Production),
            Err(ValidationError::WildcardOriginInProduction)
        );

        let empty = RealtimeConfig {
            allowed_origins: String::new(),
            ..Default::default()
        };
        assert_eq!(
            empty.validate(Environment::Production),
            Err(ValidationError::EmptyOriginsInProduction)
        );
    }

    #[test]
    fn malformed_origin_is_rejected() {
        let config = RealtimeConfig {
            allowed_origins: "localhost:5173".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(Environment::Development),
            Err(ValidationError::InvalidOrigin(_))
        ));
    }
}
