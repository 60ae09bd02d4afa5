//! Request types for booking endpoints.

use serde::Deserialize;

use crate::domain::booking::{BookingChanges, BookingStatus};
use crate::domain::foundation::{LeadId, Timestamp};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub customer_id: LeadId,
    pub service: String,
    pub date: Timestamp,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub service: Option<String>,
    pub date: Option<Timestamp>,
    #[serde(alias = "duration")]
    pub duration_minutes: Option<u32>,
    pub status: Option<BookingStatus>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

impl From<UpdateBookingRequest> for BookingChanges {
    fn from(req: UpdateBookingRequest) -> Self {
        BookingChanges {
            service: req.service,
            date: req.date,
            duration_minutes: req.duration_minutes,
            status: req.status,
            price: req.price,
            notes: req.notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_parses_rfc3339_date() {
        let id = LeadId::new();
        let body = format!(
            r#"{{"customerId":"{}","service":"Massage","date":"2026-03-01T10:00:00Z","duration":90}}"#,
            id
        );
        let req: CreateBookingRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(req.customer_id, id);
        assert_eq!(req.duration_minutes, Some(90));
        assert!(req.price.is_none());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let result = serde_json::from_str::<UpdateBookingRequest>(r#"{"status":"Teleported"}"#);
        assert!(result.is_err());
    }
}
