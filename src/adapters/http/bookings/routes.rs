//! HTTP routes for booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_booking, delete_booking, get_booking, list_bookings, update_booking, BookingHandlers,
};

pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route(
            "/:id",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .with_state(handlers)
}
