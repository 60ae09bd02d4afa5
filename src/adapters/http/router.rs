//! Router composition for the REST API.
//!
//! ```text
//! GET    /                              health
//! /api/leads        POST GET | /:id GET PUT DELETE
//! /api/bookings     POST GET | /:id GET PUT DELETE
//! /api/inventory    POST GET | /:id DELETE | /:id/stock PUT | /:id/logs GET
//! /api/messages     POST     | /:customer_id GET | /read/:customer_id PUT
//! /api/dashboard    GET
//! /api/reports/summary?range=   GET
//! ```

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use http::{header, HeaderName, HeaderValue, Method};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::domain::realtime::OriginPolicy;

use super::bookings::{booking_routes, BookingHandlers};
use super::inventory::{inventory_routes, InventoryHandlers};
use super::leads::{lead_routes, LeadHandlers};
use super::messages::{message_routes, MessageHandlers};
use super::reports::{report_routes, ReportHandlers};

/// Handler state for every REST area.
#[derive(Clone)]
pub struct ApiHandlers {
    pub leads: LeadHandlers,
    pub bookings: BookingHandlers,
    pub inventory: InventoryHandlers,
    pub messages: MessageHandlers,
    pub reports: ReportHandlers,
}

/// GET /
pub async fn health() -> &'static str {
    "CareOps backend is running"
}

/// Builds the REST router without cross-cutting layers.
pub fn api_router(handlers: ApiHandlers) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/api/leads", lead_routes(handlers.leads))
        .nest("/api/bookings", booking_routes(handlers.bookings))
        .nest("/api/inventory", inventory_routes(handlers.inventory))
        .nest("/api/messages", message_routes(handlers.messages))
        .nest("/api", report_routes(handlers.reports))
}

/// Adds compression and a request timeout. Applied to REST routes only; the
/// WebSocket upgrade must not be compressed or cut off.
pub fn with_rest_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
}

/// Adds tracing, request ids and CORS to the fully merged router.
pub fn with_common_layers(router: Router, policy: &OriginPolicy, allow_credentials: bool) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");
    router
        .layer(cors_layer(policy, allow_credentials))
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// CORS for the REST surface, driven by the same allow-list as the
/// WebSocket handshake.
pub fn cors_layer(policy: &OriginPolicy, allow_credentials: bool) -> CorsLayer {
    let policy = Arc::new(policy.clone());
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &http::request::Parts| {
                origin
                    .to_str()
                    .map(|origin| policy.allows(Some(origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(allow_credentials)
}
