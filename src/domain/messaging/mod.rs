//! Messaging module - per-lead conversations.

mod errors;
mod message;

pub use errors::MessagingError;
pub use message::{Channel, Direction, Message, NewMessage};
