use std::sync::Arc;

use crate::domain::foundation::LeadId;
use crate::domain::messaging::{Message, MessagingError};
use crate::ports::MessageRepository;

/// A lead's conversation, oldest first.
pub struct GetConversationHandler {
    messages: Arc<dyn MessageRepository>,
}

impl GetConversationHandler {
    pub fn new(messages: Arc<dyn MessageRepository>) -> Self {
        Self { messages }
    }

    pub async fn handle(&self, customer: LeadId) -> Result<Vec<Message>, MessagingError> {
        Ok(self.messages.list_for_customer(&customer).await?)
    }
}
