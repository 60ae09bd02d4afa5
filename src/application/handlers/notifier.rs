//! ChangeNotifier - turns successful mutations into published notifications.

use std::sync::Arc;

use crate::domain::realtime::{DeliveryReceipt, DomainEvent, Entity, Notification, Topic};
use crate::ports::NotificationPublisher;

/// Shared by every mutation handler. Publishing happens after the write has
/// succeeded and never turns into a handler error.
#[derive(Clone)]
pub struct ChangeNotifier {
    publisher: Arc<dyn NotificationPublisher>,
}

impl ChangeNotifier {
    pub fn new(publisher: Arc<dyn NotificationPublisher>) -> Self {
        Self { publisher }
    }

    /// Publishes the entity topic for `event`.
    ///
    /// Returns `None` if the event could not be encoded; the failure is
    /// logged and swallowed.
    pub async fn entity<T: Entity>(&self, event: DomainEvent<T>) -> Option<DeliveryReceipt> {
        match event.to_notification() {
            Ok(notification) => Some(self.publisher.publish(notification, None).await),
            Err(e) => {
                tracing::warn!(entity = ?T::KIND, "failed to encode change notification: {}", e);
                None
            }
        }
    }

    /// Tells every view derived from aggregates to refresh.
    pub async fn dashboard(&self) -> DeliveryReceipt {
        self.raw(Notification::signal(Topic::DashboardUpdated)).await
    }

    pub async fn raw(&self, notification: Notification) -> DeliveryReceipt {
        self.publisher.publish(notification, None).await
    }
}
