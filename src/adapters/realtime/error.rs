//! Errors raised by the real-time transport and its client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

use crate::domain::foundation::ValidationError;
use crate::domain::realtime::EventError;

#[derive(Debug, Error)]
pub enum RealtimeError {
    #[error("realtime transport is already initialized")]
    AlreadyInitialized,

    #[error("origin not allowed: {0}")]
    OriginNotAllowed(String),

    #[error("invalid origin pattern: {0}")]
    InvalidOriginPattern(#[from] ValidationError),

    #[error("websocket connect failed: {0}")]
    Connect(#[source] tungstenite::Error),

    #[error("websocket send failed: {0}")]
    Send(#[source] tungstenite::Error),

    #[error("connection closed")]
    Closed,

    #[error("timed out waiting for {0}")]
    Timeout(&'static str),

    #[error("unexpected frame: {0}")]
    UnexpectedFrame(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("collection fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("notification could not be decoded: {0}")]
    Decode(#[from] EventError),
}
