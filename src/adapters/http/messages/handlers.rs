//! HTTP handlers for messaging endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::common::{internal_error, not_found, parse_id, validation_failed};
use crate::application::handlers::messaging::{
    GetConversationHandler, MarkConversationReadCommand, MarkConversationReadHandler,
    SendMessageCommand, SendMessageHandler,
};
use crate::domain::foundation::LeadId;
use crate::domain::messaging::MessagingError;

use super::dto::{MarkReadResponse, SendMessageRequest};

#[derive(Clone)]
pub struct MessageHandlers {
    send_handler: Arc<SendMessageHandler>,
    mark_read_handler: Arc<MarkConversationReadHandler>,
    conversation_handler: Arc<GetConversationHandler>,
}

impl MessageHandlers {
    pub fn new(
        send_handler: Arc<SendMessageHandler>,
        mark_read_handler: Arc<MarkConversationReadHandler>,
        conversation_handler: Arc<GetConversationHandler>,
    ) -> Self {
        Self {
            send_handler,
            mark_read_handler,
            conversation_handler,
        }
    }
}

/// POST /api/messages
pub async fn send_message(
    State(handlers): State<MessageHandlers>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let cmd = SendMessageCommand {
        customer: req.customer_id,
        content: req.content,
        channel: req.channel,
        direction: req.direction,
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(message) => (StatusCode::CREATED, Json(message)).into_response(),
        Err(e) => handle_messaging_error(e),
    }
}

/// GET /api/messages/:customer_id - oldest first
pub async fn get_conversation(
    State(handlers): State<MessageHandlers>,
    Path(customer_id): Path<String>,
) -> Response {
    let customer: LeadId = match parse_id(&customer_id, "customer") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.conversation_handler.handle(customer).await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => handle_messaging_error(e),
    }
}

/// PUT /api/messages/read/:customer_id
pub async fn mark_conversation_read(
    State(handlers): State<MessageHandlers>,
    Path(customer_id): Path<String>,
) -> Response {
    let customer: LeadId = match parse_id(&customer_id, "customer") {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .mark_read_handler
        .handle(MarkConversationReadCommand { customer })
        .await
    {
        Ok(updated) => (
            StatusCode::OK,
            Json(MarkReadResponse {
                customer_id: customer,
                updated,
            }),
        )
            .into_response(),
        Err(e) => handle_messaging_error(e),
    }
}

fn handle_messaging_error(error: MessagingError) -> Response {
    match &error {
        MessagingError::CustomerNotFound(_) => not_found(error.code(), error.to_string()),
        MessagingError::ValidationFailed { field, message } => validation_failed(field, message),
        MessagingError::Infrastructure(_) => internal_error("Messaging operation", &error),
    }
}
