//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `realtime` - Topics, change events and origin policy for live updates
//! - `lead` - Prospective customers and their pipeline status
//! - `booking` - Appointments scheduled for leads
//! - `inventory` - Products and stock movements
//! - `messaging` - Per-lead conversations
//! - `reporting` - Dashboard and summary aggregates

pub mod booking;
pub mod foundation;
pub mod inventory;
pub mod lead;
pub mod messaging;
pub mod realtime;
pub mod reporting;
