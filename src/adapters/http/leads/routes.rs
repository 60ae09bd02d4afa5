//! HTTP routes for lead endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_lead, delete_lead, get_lead, list_leads, update_lead, LeadHandlers};

/// Creates the lead router with all endpoints.
pub fn lead_routes(handlers: LeadHandlers) -> Router {
    Router::new()
        .route("/", post(create_lead).get(list_leads))
        .route("/:id", get(get_lead).put(update_lead).delete(delete_lead))
        .with_state(handlers)
}
