//! Client-side mirror of one entity collection.

use crate::domain::realtime::{DomainEvent, Entity, EventError, Notification};

/// What applying one event did to a [`LiveCollection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    Inserted,
    Replaced,
    Removed,
    /// The event referred to an identity not in the collection.
    Unchanged,
    /// The event carries no entity; the caller must re-fetch.
    RefetchRequired,
}

impl Reconciliation {
    pub fn changed(self) -> bool {
        matches!(
            self,
            Reconciliation::Inserted | Reconciliation::Replaced | Reconciliation::Removed
        )
    }
}

/// Most-recent-first list of entities, changed only by wholesale replacement
/// or by reconciling [`DomainEvent`]s.
#[derive(Debug, Clone)]
pub struct LiveCollection<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Default for LiveCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> LiveCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Reconciles one event:
    ///
    /// | event            | present          | absent             |
    /// |------------------|------------------|--------------------|
    /// | Created          | replace in place | prepend            |
    /// | Updated          | replace in place | no-op              |
    /// | Deleted          | remove           | no-op              |
    /// | AggregateChanged | refetch          | refetch            |
    pub fn apply(&mut self, event: DomainEvent<T>) -> Reconciliation {
        match event {
            DomainEvent::Created(entity) => match self.position(entity.id()) {
                Some(index) => {
                    self.items[index] = entity;
                    Reconciliation::Replaced
                }
                None => {
                    self.items.insert(0, entity);
                    Reconciliation::Inserted
                }
            },
            DomainEvent::Updated(entity) => match self.position(entity.id()) {
                Some(index) => {
                    self.items[index] = entity;
                    Reconciliation::Replaced
                }
                None => Reconciliation::Unchanged,
            },
            DomainEvent::Deleted(id) => match self.position(&id) {
                Some(index) => {
                    self.items.remove(index);
                    Reconciliation::Removed
                }
                None => Reconciliation::Unchanged,
            },
            DomainEvent::AggregateChanged => Reconciliation::RefetchRequired,
        }
    }

    /// Decodes and applies a wire notification. Topics of other entity
    /// families leave the collection untouched.
    pub fn apply_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<Reconciliation, EventError> {
        Ok(match DomainEvent::<T>::from_notification(notification)? {
            Some(event) => self.apply(event),
            None => Reconciliation::Unchanged,
        })
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}
