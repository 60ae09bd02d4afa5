//! In-memory repositories.
//!
//! Each store keeps its records newest first behind a `tokio::sync::RwLock`,
//! so list reads never block on each other and writers are serialized.

mod bookings;
mod leads;
mod messages;
mod products;

pub use bookings::InMemoryBookingRepository;
pub use leads::InMemoryLeadRepository;
pub use messages::InMemoryMessageRepository;
pub use products::InMemoryProductRepository;
