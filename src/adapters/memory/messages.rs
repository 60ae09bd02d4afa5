use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, LeadId};
use crate::domain::messaging::Message;
use crate::ports::MessageRepository;

/// Messages are kept in arrival order, unlike the other stores.
#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn save(&self, message: &Message) -> Result<(), DomainError> {
        self.messages.write().await.push(message.clone());
        Ok(())
    }

    async fn list_for_customer(&self, customer: &LeadId) -> Result<Vec<Message>, DomainError> {
        Ok(self
            .messages
            .read()
            .await
            .iter()
            .filter(|m| m.customer() == customer)
            .cloned()
            .collect())
    }

    async fn mark_read_for_customer(&self, customer: &LeadId) -> Result<usize, DomainError> {
        let mut messages = self.messages.write().await;
        Ok(messages
            .iter_mut()
            .filter(|m| m.customer() == customer)
            .map(|m| m.mark_read())
            .filter(|changed| *changed)
            .count())
    }

    async fn list(&self) -> Result<Vec<Message>, DomainError> {
        Ok(self.messages.read().await.clone())
    }
}
