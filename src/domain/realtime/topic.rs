//! Closed set of notification topics.
//!
//! Wire names are camelCase (`leadCreated`, `dashboardUpdated`, ...) and are
//! the contract between the server's publishers and every subscribed view.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named kind of change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    LeadCreated,
    LeadUpdated,
    LeadDeleted,
    BookingCreated,
    BookingUpdated,
    BookingDeleted,
    ProductCreated,
    StockUpdated,
    ProductDeleted,
    NewMessage,
    MessagesRead,
    DashboardUpdated,
}

/// What a topic says happened to its entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Payload is the full new entity.
    Created,
    /// Payload is the full replacement entity.
    Updated,
    /// Payload is `{ "id": .. }`.
    Deleted,
    /// No entity payload; consumers re-fetch.
    CollectionChanged,
}

/// Entity families that have their own topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Lead,
    Booking,
    Product,
    Message,
}

/// Returned when a wire name matches no topic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown topic: {0}")]
pub struct UnknownTopic(pub String);

impl Topic {
    pub const ALL: [Topic; 12] = [
        Topic::LeadCreated,
        Topic::LeadUpdated,
        Topic::LeadDeleted,
        Topic::BookingCreated,
        Topic::BookingUpdated,
        Topic::BookingDeleted,
        Topic::ProductCreated,
        Topic::StockUpdated,
        Topic::ProductDeleted,
        Topic::NewMessage,
        Topic::MessagesRead,
        Topic::DashboardUpdated,
    ];

    /// Wire name of the topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::LeadCreated => "leadCreated",
            Topic::LeadUpdated => "leadUpdated",
            Topic::LeadDeleted => "leadDeleted",
            Topic::BookingCreated => "bookingCreated",
            Topic::BookingUpdated => "bookingUpdated",
            Topic::BookingDeleted => "bookingDeleted",
            Topic::ProductCreated => "productCreated",
            Topic::StockUpdated => "stockUpdated",
            Topic::ProductDeleted => "productDeleted",
            Topic::NewMessage => "newMessage",
            Topic::MessagesRead => "messagesRead",
            Topic::DashboardUpdated => "dashboardUpdated",
        }
    }

    pub fn change(&self) -> ChangeKind {
        match self {
            Topic::LeadCreated | Topic::BookingCreated | Topic::ProductCreated | Topic::NewMessage => {
                ChangeKind::Created
            }
            Topic::LeadUpdated | Topic::BookingUpdated | Topic::StockUpdated => ChangeKind::Updated,
            Topic::LeadDeleted | Topic::BookingDeleted | Topic::ProductDeleted => ChangeKind::Deleted,
            Topic::MessagesRead | Topic::DashboardUpdated => ChangeKind::CollectionChanged,
        }
    }

    /// Entity family the topic belongs to; `None` for the aggregate dashboard topic.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Topic::LeadCreated | Topic::LeadUpdated | Topic::LeadDeleted => Some(EntityKind::Lead),
            Topic::BookingCreated | Topic::BookingUpdated | Topic::BookingDeleted => {
                Some(EntityKind::Booking)
            }
            Topic::ProductCreated | Topic::StockUpdated | Topic::ProductDeleted => {
                Some(EntityKind::Product)
            }
            Topic::NewMessage | Topic::MessagesRead => Some(EntityKind::Message),
            Topic::DashboardUpdated => None,
        }
    }
}

impl EntityKind {
    /// Topic announcing `change` for this entity family, if one exists.
    pub fn topic(self, change: ChangeKind) -> Option<Topic> {
        Topic::ALL
            .into_iter()
            .find(|t| t.entity() == Some(self) && t.change() == change)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde_names() {
        for topic in Topic::ALL {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.as_str()));
        }
    }

    #[test]
    fn parses_every_wire_name() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>(), Ok(topic));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "leadExploded".parse::<Topic>(),
            Err(UnknownTopic("leadExploded".to_string()))
        );
    }

    #[test]
    fn entity_topics_cover_crud() {
        assert_eq!(
            EntityKind::Product.topic(ChangeKind::Updated),
            Some(Topic::StockUpdated)
        );
        assert_eq!(
            EntityKind::Booking.topic(ChangeKind::Deleted),
            Some(Topic::BookingDeleted)
        );
        assert_eq!(EntityKind::Message.topic(ChangeKind::Deleted), None);
    }

    #[test]
    fn dashboard_topic_has_no_entity() {
        assert_eq!(Topic::DashboardUpdated.entity(), None);
        assert_eq!(
            Topic::DashboardUpdated.change(),
            ChangeKind::CollectionChanged
        );
    }
}
