//! Booking repository port.

use async_trait::async_trait;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError};

/// Repository port for Booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `BookingNotFound` if the booking doesn't exist
    async fn update(&self, booking: &Booking) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// All bookings, newest first.
    async fn list(&self) -> Result<Vec<Booking>, DomainError>;

    async fn delete(&self, id: &BookingId) -> Result<bool, DomainError>;
}
