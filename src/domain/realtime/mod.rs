//! Real-time change notification vocabulary.
//!
//! Mutation handlers describe what changed as a [`DomainEvent`]; the event
//! becomes a [`Notification`] (topic + JSON payload) for the transport, and
//! clients decode it back into a `DomainEvent` to reconcile local state.

mod event;
mod group;
mod origin;
mod topic;

pub use event::{DeliveryReceipt, DomainEvent, Entity, EventError, Notification};
pub use group::GroupKey;
pub use origin::{OriginPattern, OriginPolicy};
pub use topic::{ChangeKind, EntityKind, Topic, UnknownTopic};
