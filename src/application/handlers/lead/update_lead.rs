//! UpdateLeadHandler - Command handler for partial lead updates.

use std::sync::Arc;

use crate::domain::foundation::LeadId;
use crate::domain::lead::{Lead, LeadChanges, LeadError};
use crate::domain::realtime::DomainEvent;
use crate::ports::LeadRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone)]
pub struct UpdateLeadCommand {
    pub id: LeadId,
    pub changes: LeadChanges,
}

pub struct UpdateLeadHandler {
    repository: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl UpdateLeadHandler {
    pub fn new(repository: Arc<dyn LeadRepository>, notifier: ChangeNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: UpdateLeadCommand) -> Result<Lead, LeadError> {
        let mut lead = self
            .repository
            .find_by_id(&cmd.id)
            .await?
            .ok_or(LeadError::not_found(cmd.id))?;

        lead.apply(cmd.changes)?;
        self.repository.update(&lead).await?;

        self.notifier.entity(DomainEvent::Updated(lead.clone())).await;
        self.notifier.dashboard().await;

        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLeadRepository;
    use crate::adapters::realtime::RecordingPublisher;
    use crate::domain::lead::{LeadStatus, NewLead};
    use crate::domain::realtime::Topic;

    #[tokio::test]
    async fn updates_and_publishes_full_entity() {
        let repo = Arc::new(InMemoryLeadRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let lead = Lead::new(NewLead {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap();
        repo.save(&lead).await.unwrap();

        let handler = UpdateLeadHandler::new(repo.clone(), ChangeNotifier::new(publisher.clone()));
        let updated = handler
            .handle(UpdateLeadCommand {
                id: *lead.id(),
                changes: LeadChanges {
                    status: Some(LeadStatus::Contacted),
                    ..Default::default()
                },
            })
            .await
            .unwrap();

        assert_eq!(updated.status(), LeadStatus::Contacted);
        assert_eq!(publisher.topics(), vec![Topic::LeadUpdated, Topic::DashboardUpdated]);
        let payload = publisher.notifications_for(Topic::LeadUpdated)[0]
            .payload
            .clone()
            .unwrap();
        assert_eq!(payload["status"], "Contacted");
        assert_eq!(payload["name"], "Ada");
    }

    #[tokio::test]
    async fn missing_lead_is_not_found_and_silent() {
        let repo = Arc::new(InMemoryLeadRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let handler = UpdateLeadHandler::new(repo, ChangeNotifier::new(publisher.clone()));
        let id = LeadId::new();

        let err = handler
            .handle(UpdateLeadCommand {
                id,
                changes: LeadChanges::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, LeadError::NotFound(id));
        assert!(publisher.topics().is_empty());
    }
}
