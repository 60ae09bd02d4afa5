//! GetSummaryReportHandler - range-scoped report.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::reporting::{ReportRange, SummaryReport};
use crate::ports::{BookingRepository, LeadRepository, MessageRepository, ProductRepository};

pub struct GetSummaryReportHandler {
    leads: Arc<dyn LeadRepository>,
    bookings: Arc<dyn BookingRepository>,
    products: Arc<dyn ProductRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl GetSummaryReportHandler {
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        bookings: Arc<dyn BookingRepository>,
        products: Arc<dyn ProductRepository>,
        messages: Arc<dyn MessageRepository>,
    ) -> Self {
        Self {
            leads,
            bookings,
            products,
            messages,
        }
    }

    pub async fn handle(&self, range: ReportRange) -> Result<SummaryReport, DomainError> {
        let leads = self.leads.list().await?;
        let bookings = self.bookings.list().await?;
        let products = self.products.list().await?;
        let messages = self.messages.list().await?;
        Ok(SummaryReport::compute(
            range,
            Timestamp::now(),
            &leads,
            &bookings,
            &products,
            &messages,
        ))
    }
}
