use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::booking::Booking;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode};
use crate::ports::BookingRepository;

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, booking: &Booking) -> Result<(), DomainError> {
        self.bookings.write().await.insert(0, booking.clone());
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> Result<(), DomainError> {
        let mut bookings = self.bookings.write().await;
        let slot = bookings
            .iter_mut()
            .find(|b| b.id() == booking.id())
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::BookingNotFound,
                    format!("Booking not found: {}", booking.id()),
                )
            })?;
        *slot = booking.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        Ok(self.bookings.read().await.iter().find(|b| b.id() == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Booking>, DomainError> {
        Ok(self.bookings.read().await.clone())
    }

    async fn delete(&self, id: &BookingId) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().await;
        let before = bookings.len();
        bookings.retain(|b| b.id() != id);
        Ok(bookings.len() != before)
    }
}
