//! Helpers shared by the HTTP areas.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::error::ErrorResponse;

/// Body returned by delete-style commands.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub id: String,
    pub message: String,
}

impl CommandResponse {
    pub fn new(id: impl ToString, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            message: message.into(),
        }
    }
}

/// Parses a path identifier, answering 400 when it is malformed.
pub fn parse_id<T: FromStr>(raw: &str, label: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("Invalid {} ID", label))),
        )
            .into_response()
    })
}

pub fn validation_failed(field: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(
            ErrorResponse::from_code(ErrorCode::ValidationFailed, message)
                .with_details(serde_json::json!({ "field": field })),
        ),
    )
        .into_response()
}

pub fn not_found(code: ErrorCode, message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::from_code(code, message))).into_response()
}

pub fn internal_error(context: &str, error: &dyn std::fmt::Display) -> Response {
    tracing::error!("{}: {}", context, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal(format!("{} failed", context))),
    )
        .into_response()
}

/// Maps storage failures surfaced directly by query handlers.
pub fn handle_domain_error(context: &str, err: DomainError) -> Response {
    internal_error(context, &err)
}
