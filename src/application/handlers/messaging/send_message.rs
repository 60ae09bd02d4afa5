//! SendMessageHandler - appends a message to a lead's conversation.

use std::sync::Arc;

use crate::domain::foundation::LeadId;
use crate::domain::messaging::{Channel, Direction, Message, MessagingError, NewMessage};
use crate::domain::realtime::DomainEvent;
use crate::ports::{LeadRepository, MessageRepository};

use super::super::ChangeNotifier;

#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub customer: LeadId,
    pub content: String,
    pub channel: Option<Channel>,
    /// Defaults to outbound (sent by staff).
    pub direction: Option<Direction>,
}

pub struct SendMessageHandler {
    messages: Arc<dyn MessageRepository>,
    leads: Arc<dyn LeadRepository>,
    notifier: ChangeNotifier,
}

impl SendMessageHandler {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        leads: Arc<dyn LeadRepository>,
        notifier: ChangeNotifier,
    ) -> Self {
        Self {
            messages,
            leads,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<Message, MessagingError> {
        if self.leads.find_by_id(&cmd.customer).await?.is_none() {
            return Err(MessagingError::CustomerNotFound(cmd.customer));
        }

        let message = Message::new(NewMessage {
            customer: cmd.customer,
            content: cmd.content,
            channel: cmd.channel,
            direction: cmd.direction,
        })?;
        self.messages.save(&message).await?;

        self.notifier.entity(DomainEvent::Created(message.clone())).await;
        self.notifier.dashboard().await;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryLeadRepository, InMemoryMessageRepository};
    use crate::adapters::realtime::RecordingPublisher;
    use crate::domain::lead::{Lead, NewLead};
    use crate::domain::realtime::Topic;

    #[tokio::test]
    async fn message_to_known_lead_publishes_new_message() {
        let leads = Arc::new(InMemoryLeadRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());
        let publisher = Arc::new(RecordingPublisher::new());
        let lead = Lead::new(NewLead {
            name: "Ada".to_string(),
            phone: "555".to_string(),
            ..Default::default()
        })
        .unwrap();
        leads.save(&lead).await.unwrap();
        let handler = SendMessageHandler::new(messages.clone(), leads, ChangeNotifier::new(publisher.clone()));

        let message = handler
            .handle(SendMessageCommand {
                customer: *lead.id(),
                content: "See you at 3".to_string(),
                channel: Some(Channel::Chat),
                direction: None,
            })
            .await
            .unwrap();

        assert!(message.is_read());
        assert_eq!(messages.list_for_customer(lead.id()).await.unwrap().len(), 1);
        assert_eq!(publisher.topics(), vec![Topic::NewMessage, Topic::DashboardUpdated]);
    }

    #[tokio::test]
    async fn unknown_lead_is_rejected() {
        let publisher = Arc::new(RecordingPublisher::new());
        let handler = SendMessageHandler::new(
            Arc::new(InMemoryMessageRepository::new()),
            Arc::new(InMemoryLeadRepository::new()),
            ChangeNotifier::new(publisher.clone()),
        );
        let ghost = LeadId::new();

        let err = handler
            .handle(SendMessageCommand {
                customer: ghost,
                content: "hello".to_string(),
                channel: None,
                direction: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, MessagingError::CustomerNotFound(ghost));
        assert!(publisher.topics().is_empty());
    }
}
