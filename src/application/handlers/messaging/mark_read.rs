//! MarkConversationReadHandler - marks a lead's conversation read.

use std::sync::Arc;

use serde_json::json;

use crate::domain::foundation::LeadId;
use crate::domain::messaging::MessagingError;
use crate::domain::realtime::{Notification, Topic};
use crate::ports::MessageRepository;

use super::super::ChangeNotifier;

#[derive(Debug, Clone, Copy)]
pub struct MarkConversationReadCommand {
    pub customer: LeadId,
}

pub struct MarkConversationReadHandler {
    messages: Arc<dyn MessageRepository>,
    notifier: ChangeNotifier,
}

impl MarkConversationReadHandler {
    pub fn new(messages: Arc<dyn MessageRepository>, notifier: ChangeNotifier) -> Self {
        Self { messages, notifier }
    }

    /// Returns how many messages flipped to read. `messagesRead` carries the
    /// customer id; subscribers re-fetch the conversation.
    pub async fn handle(&self, cmd: MarkConversationReadCommand) -> Result<usize, MessagingError> {
        let changed = self.messages.mark_read_for_customer(&cmd.customer).await?;

        self.notifier
            .raw(Notification::new(
                Topic::MessagesRead,
                json!({ "customerId": cmd.customer }),
            ))
            .await;
        self.notifier.dashboard().await;
        Ok(changed)
    }
}
