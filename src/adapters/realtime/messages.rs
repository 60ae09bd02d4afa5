//! WebSocket frame protocol.
//!
//! - Server → Client: `connected`, `event`, `pong`, `error`
//! - Client → Server: `join`, `ping`
//!
//! Every frame is a JSON text message tagged by `type`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::realtime::{GroupKey, Notification, Topic};

// ============================================
// Server → Client Messages
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after the upgrade.
    Connected(ConnectedMessage),

    /// A published notification.
    Event(EventMessage),

    /// Reply to a client `ping`.
    Pong(PongMessage),

    /// A client frame could not be handled.
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    pub connection_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongMessage {
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

impl ServerMessage {
    pub fn connected(connection_id: impl ToString) -> Self {
        ServerMessage::Connected(ConnectedMessage {
            connection_id: connection_id.to_string(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn event(notification: Notification) -> Self {
        ServerMessage::Event(EventMessage {
            topic: notification.topic,
            payload: notification.payload,
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    /// The carried notification, for `event` frames.
    pub fn into_notification(self) -> Option<Notification> {
        match self {
            ServerMessage::Event(event) => Some(Notification {
                topic: event.topic,
                payload: event.payload,
            }),
            _ => None,
        }
    }
}

// ============================================
// Client → Server Messages
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Add this connection to a group until disconnect.
    Join { group: GroupKey },

    Ping,
}
