//! Topic-keyed handler registry used by client views.
//!
//! Handlers are plain synchronous callbacks. [`SubscriptionRegistry::dispatch`]
//! snapshots the handler list before invoking anything, so a handler may
//! subscribe or drop subscriptions without deadlocking the registry. Each
//! entry carries a liveness flag that is re-checked right before the call, so
//! a handler released mid-dispatch is never invoked afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use crate::domain::realtime::{Notification, Topic};

type Handler = Arc<dyn Fn(&Notification) + Send + Sync>;

#[derive(Clone)]
struct Entry {
    id: u64,
    live: Arc<AtomicBool>,
    handler: Handler,
}

/// Handlers per topic, each tagged with the id of its [`Subscription`].
#[derive(Default)]
pub struct SubscriptionRegistry {
    handlers: RwLock<HashMap<Topic, Vec<Entry>>>,
    next_id: AtomicU64,
}

impl SubscriptionRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers `handler` for `topic`. The handler stays registered until
    /// the returned guard is dropped or [`Subscription::unsubscribe`]d.
    pub fn subscribe<F>(self: &Arc<Self>, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let live = Arc::new(AtomicBool::new(true));
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(topic)
            .or_default()
            .push(Entry {
                id,
                live: Arc::clone(&live),
                handler: Arc::new(handler),
            });
        tracing::trace!(topic = %topic, subscription = id, "subscribed");

        Subscription {
            registry: Arc::downgrade(self),
            topic,
            id,
            live,
        }
    }

    /// Invokes every handler registered for the notification's topic.
    /// Returns how many ran.
    pub fn dispatch(&self, notification: &Notification) -> usize {
        let entries: Vec<Entry> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&notification.topic)
            .cloned()
            .unwrap_or_default();

        let mut ran = 0;
        for entry in &entries {
            if entry.live.load(Ordering::Acquire) {
                (entry.handler)(notification);
                ran += 1;
            }
        }
        ran
    }

    pub fn handler_count(&self, topic: Topic) -> usize {
        self.handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&topic)
            .map_or(0, Vec::len)
    }

    fn remove(&self, topic: Topic, id: u64) {
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = handlers.get_mut(&topic) {
            entries.retain(|entry| entry.id != id);
            if entries.is_empty() {
                handlers.remove(&topic);
            }
        }
    }
}

/// Guard for one registered handler.
#[must_use = "dropping a Subscription unsubscribes it"]
pub struct Subscription {
    registry: Weak<SubscriptionRegistry>,
    topic: Topic,
    id: u64,
    live: Arc<AtomicBool>,
}

impl Subscription {
    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.live.swap(false, Ordering::AcqRel) {
            return;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.topic, self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter(
        registry: &Arc<SubscriptionRegistry>,
        topic: Topic,
    ) -> (Arc<AtomicUsize>, Subscription) {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&hits);
        let sub = registry.subscribe(topic, move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (hits, sub)
    }

    #[test]
    fn dispatch_reaches_only_matching_topic() {
        let registry = SubscriptionRegistry::new();
        let (leads, _a) = counter(&registry, Topic::LeadCreated);
        let (stock, _b) = counter(&registry, Topic::StockUpdated);

        let ran = registry.dispatch(&Notification::signal(Topic::LeadCreated));

        assert_eq!(ran, 1);
        assert_eq!(leads.load(Ordering::SeqCst), 1);
        assert_eq!(stock.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dropping_the_guard_unsubscribes() {
        let registry = SubscriptionRegistry::new();
        let (hits, sub) = counter(&registry, Topic::DashboardUpdated);
        assert_eq!(registry.handler_count(Topic::DashboardUpdated), 1);

        drop(sub);
        registry.dispatch(&Notification::signal(Topic::DashboardUpdated));

        assert_eq!(registry.handler_count(Topic::DashboardUpdated), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn explicit_unsubscribe_leaves_other_handlers() {
        let registry = SubscriptionRegistry::new();
        let (first, sub_first) = counter(&registry, Topic::NewMessage);
        let (second, _sub_second) = counter(&registry, Topic::NewMessage);

        sub_first.unsubscribe();
        registry.dispatch(&Notification::signal(Topic::NewMessage));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handler_may_subscribe_during_dispatch() {
        let registry = SubscriptionRegistry::new();
        let inner = Arc::clone(&registry);
        let spawned = Arc::new(RwLock::new(Vec::new()));
        let keep = Arc::clone(&spawned);
        let _sub = registry.subscribe(Topic::LeadUpdated, move |_| {
            let sub = inner.subscribe(Topic::LeadDeleted, |_| {});
            keep.write().unwrap().push(sub);
        });

        registry.dispatch(&Notification::signal(Topic::LeadUpdated));

        assert_eq!(registry.handler_count(Topic::LeadDeleted), 1);
    }

    #[test]
    fn handler_released_mid_dispatch_is_not_invoked() {
        let registry = SubscriptionRegistry::new();
        let victim_slot: Arc<RwLock<Option<Subscription>>> = Arc::new(RwLock::new(None));
        let slot = Arc::clone(&victim_slot);
        let _first = registry.subscribe(Topic::LeadCreated, move |_| {
            if let Some(sub) = slot.write().unwrap().take() {
                sub.unsubscribe();
            }
        });
        let (victim_hits, victim) = counter(&registry, Topic::LeadCreated);
        *victim_slot.write().unwrap() = Some(victim);

        let ran = registry.dispatch(&Notification::signal(Topic::LeadCreated));

        assert_eq!(ran, 1);
        assert_eq!(victim_hits.load(Ordering::SeqCst), 0);
        assert_eq!(registry.handler_count(Topic::LeadCreated), 1);
    }

    #[test]
    fn guard_outliving_registry_drops_cleanly() {
        let registry = SubscriptionRegistry::new();
        let sub = registry.subscribe(Topic::LeadCreated, |_| {});
        drop(registry);
        drop(sub);
    }
}
