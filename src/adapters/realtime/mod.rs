//! Real-time change fan-out over WebSocket.
//!
//! # Architecture
//!
//! ```text
//!   mutation handlers ──publish──▶ RealtimeHub ──▶ ConnectionRegistry
//!                                                   ├── conn-a (tenant-1)
//!                                                   ├── conn-b (tenant-1)
//!                                                   └── conn-c
//!                                                        │ bounded mpsc
//!                                                        ▼
//!                                                   writer task ──▶ socket
//! ```
//!
//! # Components
//!
//! - [`hub`] - Publish entry point, holds zero or one transport
//! - [`registry`] - Connections, groups, per-connection outbound queues
//! - [`handler`] - Axum upgrade handler with origin check
//! - [`messages`] - Frame protocol
//! - [`recording`] - Capturing publisher for tests

pub mod error;
pub mod handler;
pub mod hub;
pub mod messages;
pub mod recording;
pub mod registry;

pub use error::RealtimeError;
pub use handler::{realtime_router, ws_handler, RealtimeState};
pub use hub::{RealtimeHub, TransportHandle};
pub use messages::{
    ClientMessage, ConnectedMessage, ErrorMessage, EventMessage, PongMessage, ServerMessage,
};
pub use recording::{PublishedNotification, RecordingPublisher};
pub use registry::{ConnectionId, ConnectionRegistry};
