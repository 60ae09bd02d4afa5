use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::Timestamp;
use crate::domain::inventory::Product;
use crate::domain::lead::Lead;

use super::summary::{count_by, StatusCount};

pub const UPCOMING_LIMIT: usize = 5;
pub const LOW_STOCK_LIMIT: usize = 5;
pub const RECENT_LIMIT: usize = 3;

/// Home screen snapshot; recomputed whenever `dashboardUpdated` fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub today_leads: usize,
    pub today_bookings: usize,
    pub today_revenue: f64,
    pub lead_funnel: Vec<StatusCount>,
    pub upcoming_bookings: Vec<Booking>,
    pub low_stock: Vec<Product>,
    pub recent_leads: Vec<Lead>,
    pub recent_bookings: Vec<Booking>,
}

fn newest_first<T: Clone>(items: &[T], created_at: impl Fn(&T) -> Timestamp, limit: usize) -> Vec<T> {
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by_key(|item| std::cmp::Reverse(created_at(item)));
    sorted.truncate(limit);
    sorted
}

impl DashboardOverview {
    pub fn compute(now: Timestamp, leads: &[Lead], bookings: &[Booking], products: &[Product]) -> Self {
        let today = now.start_of_day();
        let created_today = |at: &Timestamp| !at.is_before(&today);

        let today_bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| created_today(b.created_at()))
            .collect();

        let mut upcoming: Vec<Booking> = bookings
            .iter()
            .filter(|b| b.status().is_open() && !b.date().is_before(&now))
            .cloned()
            .collect();
        upcoming.sort_by_key(|b| *b.date());
        upcoming.truncate(UPCOMING_LIMIT);

        Self {
            today_leads: leads.iter().filter(|l| created_today(l.created_at())).count(),
            today_bookings: today_bookings.len(),
            today_revenue: today_bookings
                .iter()
                .filter(|b| b.status() == BookingStatus::Completed)
                .map(|b| b.price())
                .sum(),
            lead_funnel: count_by(leads.iter().map(|l| l.status().as_str())),
            upcoming_bookings: upcoming,
            low_stock: products
                .iter()
                .filter(|p| p.stock_status().needs_attention())
                .take(LOW_STOCK_LIMIT)
                .cloned()
                .collect(),
            recent_leads: newest_first(leads, |l| *l.created_at(), RECENT_LIMIT),
            recent_bookings: newest_first(bookings, |b| *b.created_at(), RECENT_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingChanges, NewBooking};
    use crate::domain::inventory::NewProduct;
    use crate::domain::lead::NewLead;

    fn lead() -> Lead {
        Lead::new(NewLead {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn booking(lead: &Lead, days_ahead: i64) -> Booking {
        Booking::new(NewBooking {
            customer: *lead.id(),
            service: "Visit".to_string(),
            date: Timestamp::now().add_days(days_ahead),
            duration_minutes: None,
            price: Some(40.0),
            notes: None,
        })
        .unwrap()
    }

    #[test]
    fn upcoming_excludes_past_and_closed_bookings_and_sorts_by_date() {
        let l = lead();
        let later = booking(&l, 3);
        let sooner = booking(&l, 1);
        let past = booking(&l, -2);
        let mut cancelled = booking(&l, 2);
        cancelled
            .apply(BookingChanges {
                status: Some(BookingStatus::Cancelled),
                ..Default::default()
            })
            .unwrap();

        let overview = DashboardOverview::compute(
            Timestamp::now(),
            &[l],
            &[later.clone(), past, cancelled, sooner.clone()],
            &[],
        );

        assert_eq!(overview.upcoming_bookings, vec![sooner, later]);
        assert_eq!(overview.today_bookings, 4);
        assert_eq!(overview.today_revenue, 0.0);
        assert_eq!(overview.recent_bookings.len(), RECENT_LIMIT);
    }

    #[test]
    fn low_stock_lists_products_needing_attention() {
        let stocked = Product::new(NewProduct {
            name: "Mask".to_string(),
            sku: "m".to_string(),
            stock_quantity: Some(50),
            ..Default::default()
        })
        .unwrap();
        let empty = Product::new(NewProduct {
            name: "Gel".to_string(),
            sku: "g".to_string(),
            ..Default::default()
        })
        .unwrap();

        let overview = DashboardOverview::compute(Timestamp::now(), &[], &[], &[stocked, empty.clone()]);

        assert_eq!(overview.low_stock, vec![empty]);
        assert_eq!(overview.today_leads, 0);
    }
}
