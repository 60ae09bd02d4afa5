//! Booking aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{required_text, BookingId, LeadId, Timestamp, ValidationError};
use crate::domain::realtime::{Entity, EntityKind};

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }

    /// Still expected to happen.
    pub fn is_open(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A scheduled service appointment for a lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: BookingId,
    customer: LeadId,
    service: String,
    date: Timestamp,
    duration_minutes: u32,
    status: BookingStatus,
    price: f64,
    #[serde(default)]
    notes: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub customer: LeadId,
    pub service: String,
    pub date: Timestamp,
    pub duration_minutes: Option<u32>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub service: Option<String>,
    pub date: Option<Timestamp>,
    pub duration_minutes: Option<u32>,
    pub status: Option<BookingStatus>,
    pub price: Option<f64>,
    pub notes: Option<String>,
}

fn check_duration(minutes: u32) -> Result<u32, ValidationError> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
        return Err(ValidationError::out_of_range(
            "durationMinutes",
            MIN_DURATION_MINUTES as i64,
            MAX_DURATION_MINUTES as i64,
            minutes as i64,
        ));
    }
    Ok(minutes)
}

fn check_price(price: f64) -> Result<f64, ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ValidationError::invalid_format(
            "price",
            "must be a non-negative number",
        ));
    }
    Ok(price)
}

impl Booking {
    pub fn new(input: NewBooking) -> Result<Self, ValidationError> {
        let now = Timestamp::now();
        Ok(Self {
            id: BookingId::new(),
            customer: input.customer,
            service: required_text("service", &input.service)?,
            date: input.date,
            duration_minutes: check_duration(
                input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
            )?,
            status: BookingStatus::Pending,
            price: check_price(input.price.unwrap_or(0.0))?,
            notes: input.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Applies a partial update. Returns the previous status.
    pub fn apply(&mut self, changes: BookingChanges) -> Result<BookingStatus, ValidationError> {
        let service = changes
            .service
            .as_deref()
            .map(|s| required_text("service", s))
            .transpose()?;
        let duration = changes.duration_minutes.map(check_duration).transpose()?;
        let price = changes.price.map(check_price).transpose()?;

        let previous = self.status;
        if let Some(service) = service {
            self.service = service;
        }
        if let Some(date) = changes.date {
            self.date = date;
        }
        if let Some(duration) = duration {
            self.duration_minutes = duration;
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = changes.notes {
            self.notes = notes;
        }
        self.updated_at = Timestamp::now();
        Ok(previous)
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn customer(&self) -> &LeadId {
        &self.customer
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn date(&self) -> &Timestamp {
        &self.date
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

impl Entity for Booking {
    type Id = BookingId;
    const KIND: EntityKind = EntityKind::Booking;

    fn id(&self) -> &BookingId {
        &self.id
    }
}
