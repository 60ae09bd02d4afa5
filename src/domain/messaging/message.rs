//! Customer conversation messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{required_text, LeadId, MessageId, Timestamp, ValidationError};
use crate::domain::realtime::{Entity, EntityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Channel {
    #[default]
    #[serde(rename = "SMS")]
    Sms,
    Email,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    Inbound,
    #[default]
    Outbound,
}

/// One message in a customer conversation.
///
/// Outbound messages are written by staff and start out read; inbound
/// messages stay unread until the conversation is marked read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    customer: LeadId,
    content: String,
    channel: Channel,
    direction: Direction,
    read: bool,
    created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub customer: LeadId,
    pub content: String,
    pub channel: Option<Channel>,
    pub direction: Option<Direction>,
}

impl Message {
    pub fn new(input: NewMessage) -> Result<Self, ValidationError> {
        let direction = input.direction.unwrap_or_default();
        Ok(Self {
            id: MessageId::new(),
            customer: input.customer,
            content: required_text("content", &input.content)?,
            channel: input.channel.unwrap_or_default(),
            direction,
            read: direction == Direction::Outbound,
            created_at: Timestamp::now(),
        })
    }

    /// Returns true if the message was unread before the call.
    pub fn mark_read(&mut self) -> bool {
        !std::mem::replace(&mut self.read, true)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn customer(&self) -> &LeadId {
        &self.customer
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_read(&self) -> bool {
        self.read
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

impl Entity for Message {
    type Id = MessageId;
    const KIND: EntityKind = EntityKind::Message;

    fn id(&self) -> &MessageId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_message(direction: Option<Direction>) -> NewMessage {
        NewMessage {
            customer: LeadId::new(),
            content: " hello ".to_string(),
            channel: None,
            direction,
        }
    }

    #[test]
    fn outbound_messages_start_read() {
        let m = Message::new(new_message(None)).unwrap();
        assert_eq!(m.direction(), Direction::Outbound);
        assert!(m.is_read());
        assert_eq!(m.content(), "hello");
        assert_eq!(m.channel(), Channel::Sms);
    }

    #[test]
    fn inbound_messages_start_unread() {
        let mut m = Message::new(new_message(Some(Direction::Inbound))).unwrap();
        assert!(!m.is_read());
        assert!(m.mark_read());
        assert!(!m.mark_read());
    }

    #[test]
    fn blank_content_is_rejected() {
        let mut input = new_message(None);
        input.content = "  ".to_string();
        assert_eq!(
            Message::new(input).unwrap_err(),
            ValidationError::empty_field("content")
        );
    }

    #[test]
    fn channel_wire_names() {
        assert_eq!(serde_json::to_string(&Channel::Sms).unwrap(), "\"SMS\"");
        assert_eq!(serde_json::to_string(&Channel::Email).unwrap(), "\"Email\"");
    }
}
