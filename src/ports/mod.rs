//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Notification Port
//!
//! - `NotificationPublisher` - Fan-out of change notifications to live clients
//!
//! ## Repository Ports
//!
//! - `LeadRepository`, `BookingRepository`, `ProductRepository`,
//!   `MessageRepository`

mod booking_repository;
mod lead_repository;
mod message_repository;
mod notification_publisher;
mod product_repository;

pub use booking_repository::BookingRepository;
pub use lead_repository::LeadRepository;
pub use message_repository::MessageRepository;
pub use notification_publisher::NotificationPublisher;
pub use product_repository::ProductRepository;
