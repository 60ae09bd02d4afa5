//! Booking query handlers.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::ports::BookingRepository;

pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self, id: BookingId) -> Result<Booking, BookingError> {
        self.bookings
            .find_by_id(&id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }
}

/// Lists every booking, newest first.
pub struct ListBookingsHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    pub async fn handle(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list().await?)
    }
}
