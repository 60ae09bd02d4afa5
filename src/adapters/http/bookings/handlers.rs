//! HTTP handlers for booking endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::common::{
    internal_error, not_found, parse_id, validation_failed, CommandResponse,
};
use crate::application::handlers::booking::{
    CreateBookingCommand, CreateBookingHandler, DeleteBookingCommand, DeleteBookingHandler,
    GetBookingHandler, ListBookingsHandler, UpdateBookingCommand, UpdateBookingHandler,
};
use crate::domain::booking::BookingError;
use crate::domain::foundation::BookingId;

use super::dto::{CreateBookingRequest, UpdateBookingRequest};

#[derive(Clone)]
pub struct BookingHandlers {
    create_handler: Arc<CreateBookingHandler>,
    update_handler: Arc<UpdateBookingHandler>,
    delete_handler: Arc<DeleteBookingHandler>,
    get_handler: Arc<GetBookingHandler>,
    list_handler: Arc<ListBookingsHandler>,
}

impl BookingHandlers {
    pub fn new(
        create_handler: Arc<CreateBookingHandler>,
        update_handler: Arc<UpdateBookingHandler>,
        delete_handler: Arc<DeleteBookingHandler>,
        get_handler: Arc<GetBookingHandler>,
        list_handler: Arc<ListBookingsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            delete_handler,
            get_handler,
            list_handler,
        }
    }
}

/// POST /api/bookings
///
/// Also moves the customer to `Booked`.
pub async fn create_booking(
    State(handlers): State<BookingHandlers>,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let cmd = CreateBookingCommand {
        customer: req.customer_id,
        service: req.service,
        date: req.date,
        duration_minutes: req.duration_minutes,
        price: req.price,
        notes: req.notes,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(booking) => (StatusCode::CREATED, Json(booking)).into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/bookings
pub async fn list_bookings(State(handlers): State<BookingHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// GET /api/bookings/:id
pub async fn get_booking(
    State(handlers): State<BookingHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id: BookingId = match parse_id(&id, "booking") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(id).await {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// PUT /api/bookings/:id
pub async fn update_booking(
    State(handlers): State<BookingHandlers>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Response {
    let id: BookingId = match parse_id(&id, "booking") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateBookingCommand {
        id,
        changes: req.into(),
    };
    match handlers.update_handler.handle(cmd).await {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => handle_booking_error(e),
    }
}

/// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(handlers): State<BookingHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id: BookingId = match parse_id(&id, "booking") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete_handler.handle(DeleteBookingCommand { id }).await {
        Ok(()) => {
            (StatusCode::OK, Json(CommandResponse::new(id, "Booking deleted"))).into_response()
        }
        Err(e) => handle_booking_error(e),
    }
}

fn handle_booking_error(error: BookingError) -> Response {
    match &error {
        BookingError::NotFound(_) | BookingError::CustomerNotFound(_) => {
            not_found(error.code(), error.to_string())
        }
        BookingError::ValidationFailed { field, message } => validation_failed(field, message),
        BookingError::Infrastructure(_) => internal_error("Booking operation", &error),
    }
}
