//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-memory repositories
//! - `realtime` - WebSocket fan-out of change notifications
//! - `http` - REST API
//!
//! Adapters connect the domain to external systems.

pub mod http;
pub mod memory;
pub mod realtime;
