//! DeleteLeadHandler - Command handler for removing leads.

use std::sync::Arc;

use crate::domain::foundation::LeadId;
use crate::domain::lead::{Lead, LeadError};
use crate::domain::realtime::DomainEvent;
use crate::ports::LeadRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Copy)]
pub struct DeleteLeadCommand {
    pub id: LeadId,
}

pub struct DeleteLeadHandler {
    repository: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl DeleteLeadHandler {
    pub fn new(repository: Arc<dyn LeadRepository>, notifier: ChangeNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: DeleteLeadCommand) -> Result<(), LeadError> {
        if !self.repository.delete(&cmd.id).await? {
            return Err(LeadError::not_found(cmd.id));
        }
        tracing::info!(lead_id = %cmd.id, "lead deleted");

        self.notifier.entity(DomainEvent::<Lead>::Deleted(cmd.id)).await;
        self.notifier.dashboard().await;
        Ok(())
    }
}
