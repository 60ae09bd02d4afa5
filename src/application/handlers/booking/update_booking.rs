//! UpdateBookingHandler - partial booking updates; completing a booking
//! converts its lead.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingChanges, BookingError, BookingStatus};
use crate::domain::foundation::BookingId;
use crate::domain::lead::{Lead, LeadStatus};
use crate::domain::realtime::DomainEvent;
use crate::ports::{BookingRepository, LeadRepository};

use super::super::ChangeNotifier;

#[derive(Debug, Clone)]
pub struct UpdateBookingCommand {
    pub id: BookingId,
    pub changes: BookingChanges,
}

pub struct UpdateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    leads: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl UpdateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        leads: Arc<dyn LeadRepository>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            bookings,
            leads,
            notifier,
        }
    }

    /// Once the booking is stored the call succeeds. A failed lead
    /// conversion is logged and only skips its `leadUpdated`.
    pub async fn handle(&self, cmd: UpdateBookingCommand) -> Result<Booking, BookingError> {
        let mut booking = self
            .bookings
            .find_by_id(&cmd.id)
            .await?
            .ok_or(BookingError::NotFound(cmd.id))?;

        let previous = booking.apply(cmd.changes)?;
        self.bookings.update(&booking).await?;
        self.notifier.entity(DomainEvent::Updated(booking.clone())).await;

        if booking.status() == BookingStatus::Completed && previous != BookingStatus::Completed {
            if let Some(lead) = self.convert_lead(&booking).await {
                self.notifier.entity(DomainEvent::Updated(lead)).await;
            }
        }

        self.notifier.dashboard().await;
        Ok(booking)
    }

    async fn convert_lead(&self, booking: &Booking) -> Option<Lead> {
        let found = match self.leads.find_by_id(booking.customer()).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(booking_id = %booking.id(), "lead lookup failed: {}", e);
                return None;
            }
        };
        let Some(mut lead) = found else {
            tracing::warn!(
                booking_id = %booking.id(),
                lead_id = %booking.customer(),
                "completed booking has no lead to convert"
            );
            return None;
        };

        lead.set_status(LeadStatus::Converted);
        match self.leads.update(&lead).await {
            Ok(()) => Some(lead),
            Err(e) => {
                tracing::warn!(
                    booking_id = %booking.id(),
                    lead_id = %lead.id(),
                    "could not convert lead: {}",
                    e
                );
                None
            }
        }
    }
}
