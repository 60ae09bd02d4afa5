//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidSocketAddr(String),

    #[error("Connection buffer must be between 1 and 4096, got {0}")]
    InvalidConnectionBuffer(usize),

    #[error("WebSocket path must start with '/': {0}")]
    InvalidWsPath(String),

    #[error("Invalid allowed origin: {0}")]
    InvalidOrigin(String),

    #[error("Wildcard origins are not allowed in production")]
    WildcardOriginInProduction,

    #[error("An explicit origin allow-list is required in production")]
    EmptyOriginsInProduction,
}
