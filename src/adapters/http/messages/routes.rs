//! HTTP routes for messaging endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{get_conversation, mark_conversation_read, send_message, MessageHandlers};

pub fn message_routes(handlers: MessageHandlers) -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/:customer_id", get(get_conversation))
        .route("/read/:customer_id", put(mark_conversation_read))
        .with_state(handlers)
}
