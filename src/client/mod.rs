//! Client side of the change feed.
//!
//! A [`RealtimeClient`] receives events and dispatches them through a
//! [`SubscriptionRegistry`]; each [`LiveView`] reconciles its topics into a
//! [`LiveCollection`] and re-fetches from a [`CollectionSource`] when an
//! event carries no entity.

mod collection;
mod connection;
mod source;
mod subscriptions;
mod view;

pub use collection::{LiveCollection, Reconciliation};
pub use connection::{RealtimeClient, HANDSHAKE_TIMEOUT};
pub use source::{CollectionSource, HttpCollectionSource};
pub use subscriptions::{Subscription, SubscriptionRegistry};
pub use view::LiveView;
