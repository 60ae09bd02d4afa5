//! Command and query handlers.
//!
//! Every mutation handler writes first, then publishes its entity topic and
//! `dashboardUpdated` through the [`ChangeNotifier`] before returning.

pub mod booking;
pub mod inventory;
pub mod lead;
pub mod messaging;
mod notifier;
pub mod reporting;

pub use notifier::ChangeNotifier;
