//! The event bus that mutation handlers publish through.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;

use crate::config::RealtimeConfig;
use crate::domain::realtime::{DeliveryReceipt, GroupKey, Notification, OriginPolicy};
use crate::ports::NotificationPublisher;

use super::error::RealtimeError;
use super::messages::ServerMessage;
use super::registry::ConnectionRegistry;

/// The live transport: connection registry plus the handshake policy.
#[derive(Clone)]
pub struct TransportHandle {
    registry: Arc<ConnectionRegistry>,
    policy: Arc<OriginPolicy>,
    allow_credentials: bool,
}

impl TransportHandle {
    pub fn new(registry: Arc<ConnectionRegistry>, policy: OriginPolicy, allow_credentials: bool) -> Self {
        Self {
            registry,
            policy: Arc::new(policy),
            allow_credentials,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> &OriginPolicy {
        &self.policy
    }

    pub fn allow_credentials(&self) -> bool {
        self.allow_credentials
    }

    /// Checks a handshake `Origin` header against the allow-list.
    pub fn authorize_origin(&self, origin: Option<&str>) -> Result<(), RealtimeError> {
        if self.policy.allows(origin) {
            Ok(())
        } else {
            Err(RealtimeError::OriginNotAllowed(
                origin.unwrap_or_default().to_string(),
            ))
        }
    }
}

/// Holds zero or one transport and fans notifications out through it.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
/// Until [`RealtimeHub::initialize`] runs, publishing is a silent no-op.
#[derive(Default)]
pub struct RealtimeHub {
    transport: OnceLock<TransportHandle>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the transport from configuration.
    ///
    /// # Errors
    ///
    /// - `AlreadyInitialized` on any call after the first
    /// - `InvalidOriginPattern` if an allow-list entry does not parse
    pub fn initialize(&self, config: &RealtimeConfig) -> Result<TransportHandle, RealtimeError> {
        let policy = OriginPolicy::from_entries(config.origin_entries())?;
        let handle = TransportHandle::new(
            Arc::new(ConnectionRegistry::new(config.connection_buffer)),
            policy,
            config.allow_credentials,
        );
        self.transport
            .set(handle.clone())
            .map_err(|_| RealtimeError::AlreadyInitialized)?;
        tracing::info!(
            origins = config.origin_entries().len(),
            buffer = config.connection_buffer,
            "realtime transport initialized"
        );
        Ok(handle)
    }

    pub fn transport(&self) -> Option<&TransportHandle> {
        self.transport.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.get().is_some()
    }

    /// Fans a notification out, scoped to `group` when given.
    ///
    /// Never fails: with no transport, or nobody to deliver to, the receipt
    /// reports zero recipients.
    pub async fn publish(&self, notification: Notification, group: Option<&GroupKey>) -> DeliveryReceipt {
        let topic = notification.topic;
        let Some(transport) = self.transport.get() else {
            tracing::trace!(topic = %topic, "publish before transport initialized, skipping");
            return DeliveryReceipt::none(topic);
        };

        let frame = match serde_json::to_string(&ServerMessage::event(notification)) {
            Ok(json) => Arc::new(json),
            Err(e) => {
                tracing::warn!(topic = %topic, "failed to serialize notification: {}", e);
                return DeliveryReceipt::none(topic);
            }
        };

        let recipients = transport.registry.deliver(frame, group).await;
        tracing::debug!(
            topic = %topic,
            group = group.map(GroupKey::as_str),
            recipients,
            "notification published"
        );
        DeliveryReceipt { topic, recipients }
    }
}

#[async_trait]
impl NotificationPublisher for RealtimeHub {
    async fn publish(&self, notification: Notification, group: Option<&GroupKey>) -> DeliveryReceipt {
        RealtimeHub::publish(self, notification, group).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::realtime::Topic;
    use serde_json::json;

    fn config() -> RealtimeConfig {
        RealtimeConfig::default()
    }

    #[tokio::test]
    async fn publish_before_initialize_is_a_no_op() {
        let hub = RealtimeHub::new();
        let receipt = hub
            .publish(Notification::new(Topic::LeadCreated, json!({"id": 1})), None)
            .await;
        assert_eq!(receipt, DeliveryReceipt::none(Topic::LeadCreated));
        assert!(!hub.is_initialized());
    }

    #[test]
    fn second_initialize_is_rejected() {
        let hub = RealtimeHub::new();
        hub.initialize(&config()).unwrap();
        assert!(matches!(
            hub.initialize(&config()),
            Err(RealtimeError::AlreadyInitialized)
        ));
    }

    #[test]
    fn bad_origin_entry_fails_initialize_and_leaves_hub_empty() {
        let hub = RealtimeHub::new();
        let bad = RealtimeConfig {
            allowed_origins: "ftp//nope".to_string(),
            ..config()
        };
        assert!(matches!(
            hub.initialize(&bad),
            Err(RealtimeError::InvalidOriginPattern(_))
        ));
        assert!(hub.initialize(&config()).is_ok());
    }

    #[tokio::test]
    async fn publish_delivers_event_frames() {
        let hub = RealtimeHub::new();
        let transport = hub.initialize(&config()).unwrap();
        let (_id, mut rx) = transport.registry().connect().await;

        let receipt = hub
            .publish(Notification::signal(Topic::DashboardUpdated), None)
            .await;
        assert_eq!(receipt.recipients, 1);

        let frame = rx.recv().await.unwrap();
        let msg: ServerMessage = serde_json::from_str(&frame).unwrap();
        assert_eq!(
            msg.into_notification(),
            Some(Notification::signal(Topic::DashboardUpdated))
        );
    }

    #[tokio::test]
    async fn group_publish_skips_non_members() {
        let hub = RealtimeHub::new();
        let transport = hub.initialize(&config()).unwrap();
        let (member, mut rx_member) = transport.registry().connect().await;
        let (_other, mut rx_other) = transport.registry().connect().await;
        let tenant = GroupKey::new("tenant-1").unwrap();
        transport.registry().join(member, tenant.clone()).await;

        let receipt = hub
            .publish(Notification::signal(Topic::MessagesRead), Some(&tenant))
            .await;

        assert_eq!(receipt.recipients, 1);
        assert!(rx_member.try_recv().is_ok());
        assert!(rx_other.try_recv().is_err());
    }

    #[test]
    fn origin_authorization() {
        let hub = RealtimeHub::new();
        let transport = hub.initialize(&config()).unwrap();
        assert!(transport.authorize_origin(None).is_ok());
        assert!(transport.authorize_origin(Some("http://localhost:5173")).is_ok());
        assert!(matches!(
            transport.authorize_origin(Some("http://evil.example")),
            Err(RealtimeError::OriginNotAllowed(origin)) if origin == "http://evil.example"
        ));
    }
}
