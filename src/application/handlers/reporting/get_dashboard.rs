//! GetDashboardHandler - home screen overview.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::reporting::DashboardOverview;
use crate::ports::{BookingRepository, LeadRepository, ProductRepository};

pub struct GetDashboardHandler {
    leads: Arc<dyn LeadRepository>,
    bookings: Arc<dyn BookingRepository>,
    products: Arc<dyn ProductRepository>,
}

impl GetDashboardHandler {
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        bookings: Arc<dyn BookingRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            leads,
            bookings,
            products,
        }
    }

    pub async fn handle(&self) -> Result<DashboardOverview, DomainError> {
        let leads = self.leads.list().await?;
        let bookings = self.bookings.list().await?;
        let products = self.products.list().await?;
        Ok(DashboardOverview::compute(
            Timestamp::now(),
            &leads,
            &bookings,
            &products,
        ))
    }
}
