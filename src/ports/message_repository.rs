//! Message repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LeadId};
use crate::domain::messaging::Message;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn save(&self, message: &Message) -> Result<(), DomainError>;

    /// Conversation with one lead, oldest first.
    async fn list_for_customer(&self, customer: &LeadId) -> Result<Vec<Message>, DomainError>;

    /// Marks every message of the conversation read; returns how many changed.
    async fn mark_read_for_customer(&self, customer: &LeadId) -> Result<usize, DomainError>;

    /// Every stored message, used by reports.
    async fn list(&self) -> Result<Vec<Message>, DomainError>;
}
