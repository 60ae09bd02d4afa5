//! A collection kept in sync with the server by notifications.
//!
//! ```text
//!  RealtimeClient ──dispatch──▶ SubscriptionRegistry ──▶ LiveView<T>
//!                                                        │ apply
//!                                                        ▼
//!                                          LiveCollection<T> ◀── CollectionSource<T>
//!                                                                 (on RefetchRequired)
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::adapters::realtime::RealtimeError;
use crate::domain::realtime::{ChangeKind, DomainEvent, Entity, Notification, Topic};

use super::collection::{LiveCollection, Reconciliation};
use super::source::CollectionSource;
use super::subscriptions::{Subscription, SubscriptionRegistry};

struct ViewState<T: Entity> {
    collection: RwLock<Synced<T>>,
    source: Arc<dyn CollectionSource<T>>,
    /// Last refetch generation handed out.
    generation: AtomicU64,
    version: watch::Sender<u64>,
    runtime: Handle,
}

/// The collection plus the generation of the fetch it was last replaced by.
struct Synced<T: Entity> {
    items: LiveCollection<T>,
    applied: u64,
}

impl<T: Entity> ViewState<T> {
    fn on_notification(self: &Arc<Self>, notification: &Notification) {
        let event = match DomainEvent::<T>::from_notification(notification) {
            Ok(Some(event)) => event,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(topic = %notification.topic, "undecodable notification: {}", e);
                return;
            }
        };

        let outcome = self
            .collection
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .apply(event);

        match outcome {
            Reconciliation::RefetchRequired => {
                let state = Arc::clone(self);
                let topic = notification.topic;
                let generation = self.next_generation();
                self.runtime.spawn(async move {
                    if let Err(e) = state.refetch(generation).await {
                        tracing::warn!(topic = %topic, "refetch failed: {}", e);
                    }
                });
            }
            outcome if outcome.changed() => self.bump(),
            _ => {}
        }
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Replaces the collection unless a later-started fetch already landed.
    async fn refetch(&self, generation: u64) -> Result<(), RealtimeError> {
        let items = self.source.fetch().await?;
        {
            let mut synced = self.collection.write().unwrap_or_else(PoisonError::into_inner);
            if generation < synced.applied {
                tracing::debug!(generation, applied = synced.applied, "discarding stale refetch");
                return Ok(());
            }
            synced.applied = generation;
            synced.items.replace_all(items);
        }
        self.bump();
        Ok(())
    }

    fn bump(&self) {
        self.version.send_modify(|version| *version += 1);
    }
}

/// A [`LiveCollection`] bound to a registry and a re-fetch source.
///
/// Listens to every topic of `T`'s entity family. Dropping the view drops
/// its subscriptions.
pub struct LiveView<T: Entity> {
    state: Arc<ViewState<T>>,
    registry: Arc<SubscriptionRegistry>,
    subscriptions: Vec<Subscription>,
}

impl<T: Entity> LiveView<T> {
    /// Fetches the initial collection and subscribes to `T`'s topics.
    pub async fn attach(
        registry: &Arc<SubscriptionRegistry>,
        source: Arc<dyn CollectionSource<T>>,
    ) -> Result<Self, RealtimeError> {
        let items = source.fetch().await?;
        let (version, _) = watch::channel(0);
        let state = Arc::new(ViewState {
            collection: RwLock::new(Synced {
                items: LiveCollection::from_items(items),
                applied: 0,
            }),
            source,
            generation: AtomicU64::new(0),
            version,
            runtime: Handle::current(),
        });

        let mut view = Self {
            state,
            registry: Arc::clone(registry),
            subscriptions: Vec::new(),
        };
        for change in [
            ChangeKind::Created,
            ChangeKind::Updated,
            ChangeKind::Deleted,
            ChangeKind::CollectionChanged,
        ] {
            if let Some(topic) = T::KIND.topic(change) {
                view.listen(topic);
            }
        }
        Ok(view)
    }

    /// Also re-fetch whenever `topic` arrives, e.g. `dashboardUpdated`.
    pub fn refetch_on(mut self, topic: Topic) -> Self {
        self.listen(topic);
        self
    }

    fn listen(&mut self, topic: Topic) {
        let weak: Weak<ViewState<T>> = Arc::downgrade(&self.state);
        let subscription = self.registry.subscribe(topic, move |notification| {
            if let Some(state) = weak.upgrade() {
                state.on_notification(notification);
            }
        });
        self.subscriptions.push(subscription);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.state
            .collection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .items()
            .to_vec()
    }

    pub fn len(&self) -> usize {
        self.state
            .collection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &T::Id) -> Option<T> {
        self.state
            .collection
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .get(id)
            .cloned()
    }

    /// Ticks once per change to the collection.
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.state.version.subscribe()
    }

    /// Re-fetches and replaces the collection now.
    pub async fn refresh(&self) -> Result<(), RealtimeError> {
        self.state.refetch(self.state.next_generation()).await
    }

    pub fn topics(&self) -> Vec<Topic> {
        self.subscriptions.iter().map(Subscription::topic).collect()
    }
}
