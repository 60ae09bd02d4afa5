//! Range-scoped summary report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::Timestamp;
use crate::domain::inventory::Product;
use crate::domain::lead::Lead;
use crate::domain::messaging::Message;

use super::range::ReportRange;

/// Number of records sharing a status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub day: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub range: ReportRange,
    pub total_leads: usize,
    pub total_bookings: usize,
    pub leads_by_status: Vec<StatusCount>,
    pub bookings_by_status: Vec<StatusCount>,
    pub revenue_over_time: Vec<DailyRevenue>,
    pub inventory_status: Vec<StatusCount>,
    pub unread_messages: usize,
}

/// Groups labels into sorted counts.
pub(crate) fn count_by<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<StatusCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

impl SummaryReport {
    /// Leads and bookings are filtered by creation time; inventory and
    /// unread messages always reflect the current state.
    pub fn compute(
        range: ReportRange,
        now: Timestamp,
        leads: &[Lead],
        bookings: &[Booking],
        products: &[Product],
        messages: &[Message],
    ) -> Self {
        let leads: Vec<&Lead> = leads
            .iter()
            .filter(|l| range.contains(now, l.created_at()))
            .collect();
        let bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| range.contains(now, b.created_at()))
            .collect();

        let mut revenue: BTreeMap<String, f64> = BTreeMap::new();
        for booking in bookings
            .iter()
            .filter(|b| b.status() == BookingStatus::Completed)
        {
            *revenue.entry(booking.created_at().day_key()).or_default() += booking.price();
        }

        Self {
            range,
            total_leads: leads.len(),
            total_bookings: bookings.len(),
            leads_by_status: count_by(leads.iter().map(|l| l.status().as_str())),
            bookings_by_status: count_by(bookings.iter().map(|b| b.status().as_str())),
            revenue_over_time: revenue
                .into_iter()
                .map(|(day, revenue)| DailyRevenue { day, revenue })
                .collect(),
            inventory_status: count_by(products.iter().map(|p| p.stock_status().as_str())),
            unread_messages: messages.iter().filter(|m| !m.is_read()).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::{BookingChanges, NewBooking};
    use crate::domain::inventory::NewProduct;
    use crate::domain::lead::NewLead;
    use crate::domain::messaging::{Direction, NewMessage};

    fn lead(name: &str) -> Lead {
        Lead::new(NewLead {
            name: name.to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn booking(lead: &Lead, price: f64, status: BookingStatus) -> Booking {
        let mut b = Booking::new(NewBooking {
            customer: *lead.id(),
            service: "Cleaning".to_string(),
            date: Timestamp::now().add_days(1),
            duration_minutes: None,
            price: Some(price),
            notes: None,
        })
        .unwrap();
        b.apply(BookingChanges {
            status: Some(status),
            ..Default::default()
        })
        .unwrap();
        b
    }

    #[test]
    fn summary_counts_and_revenue() {
        let a = lead("A");
        let b = lead("B");
        let bookings = vec![
            booking(&a, 100.0, BookingStatus::Completed),
            booking(&b, 50.0, BookingStatus::Completed),
            booking(&b, 999.0, BookingStatus::Cancelled),
        ];
        let products = vec![Product::new(NewProduct {
            name: "Soap".to_string(),
            sku: "s1".to_string(),
            ..Default::default()
        })
        .unwrap()];
        let messages = vec![
            Message::new(NewMessage {
                customer: *a.id(),
                content: "hi".to_string(),
                channel: None,
                direction: Some(Direction::Inbound),
            })
            .unwrap(),
            Message::new(NewMessage {
                customer: *a.id(),
                content: "hello".to_string(),
                channel: None,
                direction: None,
            })
            .unwrap(),
        ];

        let now = Timestamp::now();
        let report = SummaryReport::compute(
            ReportRange::Today,
            now,
            &[a, b],
            &bookings,
            &products,
            &messages,
        );

        assert_eq!(report.total_leads, 2);
        assert_eq!(report.total_bookings, 3);
        assert_eq!(
            report.leads_by_status,
            vec![StatusCount {
                status: "New".to_string(),
                count: 2
            }]
        );
        assert_eq!(report.revenue_over_time.len(), 1);
        assert_eq!(report.revenue_over_time[0].revenue, 150.0);
        assert_eq!(report.inventory_status[0].status, "Out of Stock");
        assert_eq!(report.unread_messages, 1);
    }
}
