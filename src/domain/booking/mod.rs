//! Booking module - appointments scheduled for leads.

mod aggregate;
mod errors;

pub use aggregate::{
    Booking, BookingChanges, BookingStatus, NewBooking, DEFAULT_DURATION_MINUTES,
    MIN_DURATION_MINUTES,
};
pub use errors::BookingError;
