use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;
use crate::domain::realtime::DomainEvent;
use crate::ports::BookingRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Copy)]
pub struct DeleteBookingCommand {
    pub id: BookingId,
}

pub struct DeleteBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    notifier: ChangeNotifier,
}

impl DeleteBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, notifier: ChangeNotifier) -> Self {
        Self { bookings, notifier }
    }

    pub async fn handle(&self, cmd: DeleteBookingCommand) -> Result<(), BookingError> {
        if !self.bookings.delete(&cmd.id).await? {
            return Err(BookingError::NotFound(cmd.id));
        }
        self.notifier.entity(DomainEvent::<Booking>::Deleted(cmd.id)).await;
        self.notifier.dashboard().await;
        Ok(())
    }
}
