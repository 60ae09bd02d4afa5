//! HTTP handlers for lead endpoints.

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
use crate::application::handlers::lead::{
    CreateLeadCommand, CreateLeadHandler, DeleteLeadCommand, DeleteLeadHandler, GetLeadHandler,
    ListLeadsHandler, UpdateLeadCommand, UpdateLeadHandler,
};
use crate::domain::foundation::LeadId;
use crate::domain::lead::LeadError;

use super::dto::{CreateLeadRequest, UpdateLeadRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct LeadHandlers {
    create_handler: Arc<CreateLeadHandler>,
    update_handler: Arc<UpdateLeadHandler>,
    delete_handler: Arc<DeleteLeadHandler>,
    get_handler: Arc<GetLeadHandler>,
    list_handler: Arc<ListLeadsHandler>,
}

impl LeadHandlers {
    pub fn new(
        create_handler: Arc<CreateLeadHandler>,
        update_handler: Arc<UpdateLeadHandler>,
        delete_handler: Arc<DeleteLeadHandler>,
        get_handler: Arc<GetLeadHandler>,
        list_handler: Arc<ListLeadsHandler>,
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

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/leads
pub async fn create_lead(
    State(handlers): State<LeadHandlers>,
    Json(req): Json<CreateLeadRequest>,
) -> Response {
    let cmd = CreateLeadCommand {
        name: req.name,
        phone: req.phone,
        email: req.email,
        source: req.source,
        status: req.status,
        notes: req.notes,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(lead) => (StatusCode::CREATED, Json(lead)).into_response(),
        Err(e) => handle_lead_error(e),
    }
}

/// GET /api/leads - newest first
pub async fn list_leads(State(handlers): State<LeadHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(leads) => (StatusCode::OK, Json(leads)).into_response(),
        Err(e) => handle_lead_error(e),
    }
}

/// GET /api/leads/:id
pub async fn get_lead(State(handlers): State<LeadHandlers>, Path(id): Path<String>) -> Response {
    let id: LeadId = match parse_id(&id, "lead") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get_handler.handle(id).await {
        Ok(lead) => (StatusCode::OK, Json(lead)).into_response(),
        Err(e) => handle_lead_error(e),
    }
}

/// PUT /api/leads/:id
pub async fn update_lead(
    State(handlers): State<LeadHandlers>,
    Path(id): Path<String>,
    Json(req): Json<UpdateLeadRequest>,
) -> Response {
    let id: LeadId = match parse_id(&id, "lead") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = UpdateLeadCommand {
        id,
        changes: req.into(),
    };
    match handlers.update_handler.handle(cmd).await {
        Ok(lead) => (StatusCode::OK, Json(lead)).into_response(),
        Err(e) => handle_lead_error(e),
    }
}

/// DELETE /api/leads/:id
pub async fn delete_lead(State(handlers): State<LeadHandlers>, Path(id): Path<String>) -> Response {
    let id: LeadId = match parse_id(&id, "lead") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete_handler.handle(DeleteLeadCommand { id }).await {
        Ok(()) => (StatusCode::OK, Json(CommandResponse::new(id, "Lead deleted"))).into_response(),
        Err(e) => handle_lead_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_lead_error(error: LeadError) -> Response {
    match &error {
        LeadError::NotFound(_) => not_found(error.code(), error.message()),
        LeadError::ValidationFailed { field, message } => validation_failed(field, message),
        LeadError::Infrastructure(_) => internal_error("Lead operation", &error),
    }
}
