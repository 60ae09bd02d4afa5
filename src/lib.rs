//! CareOps - operations backend with live change fan-out.
//!
//! Leads, bookings, inventory and messaging behind a REST API. Every
//! mutation publishes a change notification over WebSocket, and the
//! [`client`] module mirrors those notifications into local collections.

pub mod adapters;
pub mod app;
pub mod application;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
