//! Booking HTTP area.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateBookingRequest, UpdateBookingRequest};
pub use handlers::BookingHandlers;
pub use routes::booking_routes;
