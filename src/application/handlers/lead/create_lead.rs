//! CreateLeadHandler - Command handler for capturing new leads.

use std::sync::Arc;

use crate::domain::lead::{Lead, LeadError, LeadSource, LeadStatus, NewLead};
use crate::domain::realtime::DomainEvent;
use crate::ports::LeadRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Default)]
pub struct CreateLeadCommand {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub notes: Option<String>,
}

pub struct CreateLeadHandler {
    repository: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl CreateLeadHandler {
    pub fn new(repository: Arc<dyn LeadRepository>, notifier: ChangeNotifier) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CreateLeadCommand) -> Result<Lead, LeadError> {
        let lead = Lead::new(NewLead {
            name: cmd.name,
            phone: cmd.phone,
            email: cmd.email,
            source: cmd.source,
            status: cmd.status,
            notes: cmd.notes,
        })?;

        self.repository.save(&lead).await?;
        tracing::info!(lead_id = %lead.id(), "lead created");

        self.notifier.entity(DomainEvent::Created(lead.clone())).await;
        self.notifier.dashboard().await;

        Ok(lead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryLeadRepository;
    use crate::adapters::realtime::RecordingPublisher;
    use crate::domain::realtime::Topic;

    fn setup() -> (CreateLeadHandler, Arc<InMemoryLeadRepository>, Arc<RecordingPublisher>) {
        let repo = Arc::new(InMemoryLeadRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let handler = CreateLeadHandler::new(repo.clone(), ChangeNotifier::new(publisher.clone()));
        (handler, repo, publisher)
    }

    #[tokio::test]
    async fn creates_and_publishes_entity_then_dashboard() {
        let (handler, repo, publisher) = setup();

        let lead = handler
            .handle(CreateLeadCommand {
                name: "Ada".to_string(),
                phone: "555-0100".to_string(),
                email: Some("ADA@Example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(lead.email(), Some("ada@example.com"));
        assert!(repo.find_by_id(lead.id()).await.unwrap().is_some());
        assert_eq!(publisher.topics(), vec![Topic::LeadCreated, Topic::DashboardUpdated]);

        let created = &publisher.notifications_for(Topic::LeadCreated)[0];
        assert_eq!(created.payload.as_ref().unwrap()["name"], "Ada");
    }

    #[tokio::test]
    async fn invalid_input_publishes_nothing() {
        let (handler, repo, publisher) = setup();

        let err = handler
            .handle(CreateLeadCommand {
                name: " ".to_string(),
                phone: "555".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LeadError::ValidationFailed { ref field, .. } if field == "name"));
        assert!(repo.list().await.unwrap().is_empty());
        assert!(publisher.topics().is_empty());
    }
}
