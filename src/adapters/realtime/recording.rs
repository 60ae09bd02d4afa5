//! Recording publisher for testing.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It uses `.expect()` on lock
//! operations which will panic if locks are poisoned. Production code
//! publishes through [`RealtimeHub`](super::RealtimeHub).

use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::realtime::{DeliveryReceipt, GroupKey, Notification, Topic};
use crate::ports::NotificationPublisher;

/// One captured publish.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedNotification {
    pub notification: Notification,
    pub group: Option<GroupKey>,
}

/// Captures every publish for assertions and reports a fixed recipient count.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(RecordingPublisher::new());
/// handler.handle(cmd).await?;
/// assert_eq!(publisher.topics(), vec![Topic::LeadCreated, Topic::DashboardUpdated]);
/// ```
#[derive(Default)]
pub struct RecordingPublisher {
    published: RwLock<Vec<PublishedNotification>>,
    recipients: usize,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports `recipients` on every receipt.
    pub fn with_recipients(recipients: usize) -> Self {
        Self {
            published: RwLock::new(Vec::new()),
            recipients,
        }
    }

    // === Test Helpers ===

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published(&self) -> Vec<PublishedNotification> {
        self.published
            .read()
            .expect("RecordingPublisher: lock poisoned")
            .clone()
    }

    /// Topics in publish order.
    pub fn topics(&self) -> Vec<Topic> {
        self.published()
            .into_iter()
            .map(|p| p.notification.topic)
            .collect()
    }

    pub fn notifications_for(&self, topic: Topic) -> Vec<Notification> {
        self.published()
            .into_iter()
            .filter(|p| p.notification.topic == topic)
            .map(|p| p.notification)
            .collect()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("RecordingPublisher: lock poisoned")
            .clear();
    }
}

#[async_trait]
impl NotificationPublisher for RecordingPublisher {
    async fn publish(&self, notification: Notification, group: Option<&GroupKey>) -> DeliveryReceipt {
        let topic = notification.topic;
        self.published
            .write()
            .expect("RecordingPublisher: lock poisoned")
            .push(PublishedNotification {
                notification,
                group: group.cloned(),
            });
        DeliveryReceipt {
            topic,
            recipients: self.recipients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_in_order() {
        let publisher = RecordingPublisher::with_recipients(3);
        let group = GroupKey::new("t").unwrap();
        publisher
            .publish(Notification::signal(Topic::MessagesRead), Some(&group))
            .await;
        let receipt = publisher
            .publish(Notification::signal(Topic::DashboardUpdated), None)
            .await;

        assert_eq!(receipt.recipients, 3);
        assert_eq!(publisher.topics(), vec![Topic::MessagesRead, Topic::DashboardUpdated]);
        assert_eq!(publisher.published()[0].group, Some(group));

        publisher.clear();
        assert!(publisher.topics().is_empty());
    }
}
