//! Messaging command and query handlers.

mod get_conversation;
mod mark_read;
mod send_message;

pub use get_conversation::GetConversationHandler;
pub use mark_read::{MarkConversationReadCommand, MarkConversationReadHandler};
pub use send_message::{SendMessageCommand, SendMessageHandler};
