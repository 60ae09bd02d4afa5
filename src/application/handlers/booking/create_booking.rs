//! CreateBookingHandler - schedules a booking and moves its lead to Booked.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, NewBooking};
use crate::domain::foundation::{LeadId, Timestamp};
use crate::domain::lead::LeadStatus;
use crate::domain::realtime::DomainEvent;
use crate::ports::{BookingRepository, LeadRepository};

use super::super::ChangeNotifier;

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub customer: LeadId,
    pub service: String,
    pub date: Timestamp,
    pub duration_minutes: Option<u32>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    leads: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl CreateBookingHandler {
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

    /// Publishes `bookingCreated`, then `leadUpdated` for the cascaded
    /// status change, then `dashboardUpdated`.
    ///
    /// Once the booking is stored the call succeeds. A lead that can no
    /// longer be updated only skips the `leadUpdated` cascade.
    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<Booking, BookingError> {
        let mut lead = self
            .leads
            .find_by_id(&cmd.customer)
            .await?
            .ok_or(BookingError::CustomerNotFound(cmd.customer))?;

        let booking = Booking::new(NewBooking {
            customer: cmd.customer,
            service: cmd.service,
            date: cmd.date,
            duration_minutes: cmd.duration_minutes,
            price: cmd.price,
            notes: cmd.notes,
        })?;
        self.bookings.save(&booking).await?;

        tracing::info!(booking_id = %booking.id(), lead_id = %lead.id(), "booking created");

        lead.set_status(LeadStatus::Booked);
        let cascaded = match self.leads.update(&lead).await {
            Ok(()) => Some(lead),
            Err(e) => {
                tracing::warn!(
                    booking_id = %booking.id(),
                    lead_id = %lead.id(),
                    "could not mark lead booked: {}",
                    e
                );
                None
            }
        };

        self.notifier.entity(DomainEvent::Created(booking.clone())).await;
        if let Some(lead) = cascaded {
            self.notifier.entity(DomainEvent::Updated(lead)).await;
        }
        self.notifier.dashboard().await;

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryBookingRepository, InMemoryLeadRepository};
    use crate::adapters::realtime::RecordingPublisher;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::lead::{Lead, NewLead};
    use crate::domain::realtime::Topic;
    use async_trait::async_trait;

    /// Lead store whose lead disappears before the status write lands.
    struct VanishingLeads(InMemoryLeadRepository);

    #[async_trait]
    impl LeadRepository for VanishingLeads {
        async fn save(&self, lead: &Lead) -> Result<(), DomainError> {
            self.0.save(lead).await
        }
        async fn update(&self, lead: &Lead) -> Result<(), DomainError> {
            self.0.delete(lead.id()).await?;
            Err(DomainError::new(ErrorCode::LeadNotFound, "Lead not found"))
        }
        async fn find_by_id(&self, id: &LeadId) -> Result<Option<Lead>, DomainError> {
            self.0.find_by_id(id).await
        }
        async fn list(&self) -> Result<Vec<Lead>, DomainError> {
            self.0.list().await
        }
        async fn delete(&self, id: &LeadId) -> Result<bool, DomainError> {
            self.0.delete(id).await
        }
    }

    fn command(customer: LeadId) -> CreateBookingCommand {
        CreateBookingCommand {
            customer,
            service: "Consultation".to_string(),
            date: Timestamp::now().add_days(2),
            duration_minutes: None,
            price: Some(80.0),
            notes: None,
        }
    }

    #[tokio::test]
    async fn booking_marks_lead_booked_and_publishes_cascade() {
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let leads = Arc::new(InMemoryLeadRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let lead = Lead::new(NewLead {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap();
        leads.save(&lead).await.unwrap();

        let handler = CreateBookingHandler::new(
            bookings.clone(),
            leads.clone(),
            ChangeNotifier::new(publisher.clone()),
        );
        let booking = handler.handle(command(*lead.id())).await.unwrap();

        assert_eq!(booking.duration_minutes(), 60);
        assert_eq!(
            leads.find_by_id(lead.id()).await.unwrap().unwrap().status(),
            LeadStatus::Booked
        );
        assert_eq!(
            publisher.topics(),
            vec![Topic::BookingCreated, Topic::LeadUpdated, Topic::DashboardUpdated]
        );
        let lead_payload = publisher.notifications_for(Topic::LeadUpdated)[0]
            .payload
            .clone()
            .unwrap();
        assert_eq!(lead_payload["status"], "Booked");
    }

    #[tokio::test]
    async fn failed_lead_cascade_still_publishes_the_booking() {
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let leads = Arc::new(VanishingLeads(InMemoryLeadRepository::new()));
        let publisher = Arc::new(RecordingPublisher::new());
        let lead = Lead::new(NewLead {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap();
        leads.save(&lead).await.unwrap();

        let handler = CreateBookingHandler::new(
            bookings.clone(),
            leads,
            ChangeNotifier::new(publisher.clone()),
        );
        let booking = handler.handle(command(*lead.id())).await.unwrap();

        assert_eq!(bookings.list().await.unwrap(), vec![booking]);
        assert_eq!(
            publisher.topics(),
            vec![Topic::BookingCreated, Topic::DashboardUpdated]
        );
    }

    #[tokio::test]
    async fn unknown_customer_is_rejected_before_any_write() {
        let bookings = Arc::new(InMemoryBookingRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let handler = CreateBookingHandler::new(
            bookings.clone(),
            Arc::new(InMemoryLeadRepository::new()),
            ChangeNotifier::new(publisher.clone()),
        );
        let ghost = LeadId::new();

        let err = handler.handle(command(ghost)).await.unwrap_err();

        assert_eq!(err, BookingError::CustomerNotFound(ghost));
        assert!(bookings.list().await.unwrap().is_empty());
        assert!(publisher.topics().is_empty());
    }
}
