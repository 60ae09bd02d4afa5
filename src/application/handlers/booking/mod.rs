//! Booking command and query handlers.

mod create_booking;
mod delete_booking;
mod get_bookings;
mod update_booking;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use delete_booking::{DeleteBookingCommand, DeleteBookingHandler};
pub use get_bookings::{GetBookingHandler, ListBookingsHandler};
pub use update_booking::{UpdateBookingCommand, UpdateBookingHandler};
