//! NotificationPublisher port - Interface for fanning out change notifications.
//!
//! Mutation handlers depend on this port rather than on the WebSocket
//! transport, so a fresh recording publisher can stand in during tests.

use async_trait::async_trait;

use crate::domain::realtime::{DeliveryReceipt, GroupKey, Notification};

/// Port for pushing a notification to connected subscribers.
///
/// Implementations must ensure:
/// - Publishing never fails the caller; undeliverable events are dropped
/// - With a group, only members of that group receive the notification
/// - Without a group, every connection receives it
/// - Delivery is at-most-once per connection, with no replay
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publish a notification, optionally scoped to one group.
    ///
    /// Returns how many connections accepted it into their outbound queue.
    async fn publish(&self, notification: Notification, group: Option<&GroupKey>) -> DeliveryReceipt;
}
