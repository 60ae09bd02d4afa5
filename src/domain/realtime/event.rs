//! Typed change events and their wire notifications.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use super::topic::{ChangeKind, EntityKind, Topic};

/// An entity that can be mirrored into a client-side collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: EntityKind;

    fn id(&self) -> &Self::Id;
}

/// A change to one entity family.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent<T: Entity> {
    Created(T),
    Updated(T),
    Deleted(T::Id),
    AggregateChanged,
}

/// A topic plus its (optional) payload, as carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub topic: Topic,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

/// Outcome of a publish: how many connections accepted the event into their
/// outbound queue. Acceptance is not delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub topic: Topic,
    pub recipients: usize,
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{entity:?} has no topic for {change:?} changes")]
    NoTopic {
        entity: EntityKind,
        change: ChangeKind,
    },

    #[error("topic {0} requires a payload")]
    MissingPayload(Topic),

    #[error("payload does not match topic: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct DeletedRef<I> {
    id: I,
}

impl<T: Entity> DomainEvent<T> {
    pub fn change(&self) -> ChangeKind {
        match self {
            DomainEvent::Created(_) => ChangeKind::Created,
            DomainEvent::Updated(_) => ChangeKind::Updated,
            DomainEvent::Deleted(_) => ChangeKind::Deleted,
            DomainEvent::AggregateChanged => ChangeKind::CollectionChanged,
        }
    }

    /// Topic this event is published under.
    ///
    /// Aggregate changes fall back to `dashboardUpdated` for families without
    /// a dedicated collection topic.
    pub fn topic(&self) -> Result<Topic, EventError> {
        match (T::KIND.topic(self.change()), self.change()) {
            (Some(topic), _) => Ok(topic),
            (None, ChangeKind::CollectionChanged) => Ok(Topic::DashboardUpdated),
            (None, change) => Err(EventError::NoTopic {
                entity: T::KIND,
                change,
            }),
        }
    }

    pub fn to_notification(&self) -> Result<Notification, EventError> {
        let topic = self.topic()?;
        let payload = match self {
            DomainEvent::Created(entity) | DomainEvent::Updated(entity) => {
                Some(serde_json::to_value(entity)?)
            }
            DomainEvent::Deleted(id) => Some(serde_json::to_value(DeletedRef { id })?),
            DomainEvent::AggregateChanged => None,
        };
        Ok(Notification { topic, payload })
    }

    /// Decodes a notification for this entity family.
    ///
    /// Returns `Ok(None)` for topics that belong to another family.
    /// Family-less signals such as `dashboardUpdated` decode for every `T`.
    pub fn from_notification(notification: &Notification) -> Result<Option<Self>, EventError> {
        let topic = notification.topic;
        let change = topic.change();
        let foreign = match topic.entity() {
            Some(kind) => kind != T::KIND,
            None => change != ChangeKind::CollectionChanged,
        };
        if foreign {
            return Ok(None);
        }

        let payload = || {
            notification
                .payload
                .clone()
                .ok_or(EventError::MissingPayload(topic))
        };

        let event = match change {
            ChangeKind::Created => DomainEvent::Created(serde_json::from_value(payload()?)?),
            ChangeKind::Updated => DomainEvent::Updated(serde_json::from_value(payload()?)?),
            ChangeKind::Deleted => {
                let reference: DeletedRef<T::Id> = serde_json::from_value(payload()?)?;
                DomainEvent::Deleted(reference.id)
            }
            ChangeKind::CollectionChanged => DomainEvent::AggregateChanged,
        };
        Ok(Some(event))
    }
}

impl Notification {
    pub fn new(topic: Topic, payload: Value) -> Self {
        Self {
            topic,
            payload: Some(payload),
        }
    }

    /// A payload-less notification such as `dashboardUpdated`.
    pub fn signal(topic: Topic) -> Self {
        Self {
            topic,
            payload: None,
        }
    }
}

impl DeliveryReceipt {
    /// Receipt for a publish nobody could accept.
    pub fn none(topic: Topic) -> Self {
        Self {
            topic,
            recipients: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u32,
        name: String,
    }

    impl Entity for Widget {
        type Id = u32;
        const KIND: EntityKind = EntityKind::Lead;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
    }

    impl Entity for Note {
        type Id = u32;
        const KIND: EntityKind = EntityKind::Message;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    fn widget() -> Widget {
        Widget {
            id: 1,
            name: "a".to_string(),
        }
    }

    #[test]
    fn created_carries_full_entity() {
        let n = DomainEvent::Created(widget()).to_notification().unwrap();
        assert_eq!(n.topic, Topic::LeadCreated);
        assert_eq!(n.payload, Some(json!({"id": 1, "name": "a"})));
    }

    #[test]
    fn deleted_carries_identity_reference() {
        let n = DomainEvent::<Widget>::Deleted(7).to_notification().unwrap();
        assert_eq!(n.topic, Topic::LeadDeleted);
        assert_eq!(n.payload, Some(json!({"id": 7})));
    }

    #[test]
    fn aggregate_change_has_no_payload() {
        let n = DomainEvent::<Widget>::AggregateChanged
            .to_notification()
            .unwrap();
        assert_eq!(n, Notification::signal(Topic::DashboardUpdated));
    }

    #[test]
    fn missing_topic_is_reported() {
        let err = DomainEvent::<Note>::Deleted(1).to_notification().unwrap_err();
        assert!(matches!(err, EventError::NoTopic { .. }));
    }

    #[test]
    fn decodes_update() {
        let n = Notification::new(Topic::LeadUpdated, json!({"id": 1, "name": "b"}));
        let event = DomainEvent::<Widget>::from_notification(&n).unwrap();
        assert_eq!(
            event,
            Some(DomainEvent::Updated(Widget {
                id: 1,
                name: "b".to_string()
            }))
        );
    }

    #[test]
    fn decodes_delete_reference() {
        let n = Notification::new(Topic::LeadDeleted, json!({"id": 1}));
        let event = DomainEvent::<Widget>::from_notification(&n).unwrap();
        assert_eq!(event, Some(DomainEvent::Deleted(1)));
    }

    #[test]
    fn foreign_topic_decodes_to_none() {
        let n = Notification::new(Topic::BookingCreated, json!({"id": 1}));
        assert_eq!(DomainEvent::<Widget>::from_notification(&n).unwrap(), None);
    }

    #[test]
    fn family_aggregate_signal_only_decodes_for_its_family() {
        let n = Notification::new(Topic::MessagesRead, json!({"customerId": "c1"}));
        assert_eq!(DomainEvent::<Widget>::from_notification(&n).unwrap(), None);
        assert_eq!(
            DomainEvent::<Note>::from_notification(&n).unwrap(),
            Some(DomainEvent::AggregateChanged)
        );
    }

    #[test]
    fn dashboard_signal_decodes_for_any_family() {
        let n = Notification::signal(Topic::DashboardUpdated);
        assert_eq!(
            DomainEvent::<Widget>::from_notification(&n).unwrap(),
            Some(DomainEvent::AggregateChanged)
        );
    }

    #[test]
    fn created_without_payload_is_an_error() {
        let n = Notification::signal(Topic::LeadCreated);
        let err = DomainEvent::<Widget>::from_notification(&n).unwrap_err();
        assert!(matches!(err, EventError::MissingPayload(Topic::LeadCreated)));
    }

    #[test]
    fn notification_omits_empty_payload_on_the_wire() {
        let json = serde_json::to_string(&Notification::signal(Topic::DashboardUpdated)).unwrap();
        assert_eq!(json, r#"{"topic":"dashboardUpdated"}"#);
    }
}
