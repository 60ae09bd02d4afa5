//! Messaging HTTP area.

mod dto;
mod handlers;
mod routes;

pub use dto::{MarkReadResponse, SendMessageRequest};
pub use handlers::MessageHandlers;
pub use routes::message_routes;
