//! Connection and group bookkeeping for the WebSocket transport.
//!
//! ```text
//! Group: tenant-1      Group: tenant-2
//! ├── conn-a           ├── conn-c
//! └── conn-b           └── conn-a
//! ```
//!
//! A connection may belong to any number of groups. Group-scoped delivery
//! reaches only members; unscoped delivery reaches every connection.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::realtime::GroupKey;

/// Server-assigned identifier for one WebSocket connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct ConnectionEntry {
    outbound: mpsc::Sender<Arc<String>>,
    groups: HashSet<GroupKey>,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnectionId, ConnectionEntry>,
    groups: HashMap<GroupKey, HashSet<ConnectionId>>,
}

/// Tracks live connections, their outbound queues, and group membership.
///
/// # Thread Safety
///
/// Fan-out takes the read lock; connect, join and disconnect take the write
/// lock. Delivery uses `try_send`, so a publish never waits on a slow socket.
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
    buffer: usize,
    dropped: AtomicU64,
}

impl ConnectionRegistry {
    /// `buffer` is the outbound queue capacity of each connection.
    pub fn new(buffer: usize) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            buffer: buffer.max(1),
            dropped: AtomicU64::new(0),
        }
    }

    /// Registers a new connection and hands back the receiving end of its
    /// outbound queue.
    pub async fn connect(&self) -> (ConnectionId, mpsc::Receiver<Arc<String>>) {
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::channel(self.buffer);
        self.state.write().await.connections.insert(
            id,
            ConnectionEntry {
                outbound: tx,
                groups: HashSet::new(),
            },
        );
        tracing::debug!(connection_id = %id, "connection registered");
        (id, rx)
    }

    /// Adds a connection to a group. Joining twice is a no-op.
    ///
    /// Returns `false` if the connection is unknown.
    pub async fn join(&self, id: ConnectionId, group: GroupKey) -> bool {
        let mut state = self.state.write().await;
        let Some(entry) = state.connections.get_mut(&id) else {
            return false;
        };
        entry.groups.insert(group.clone());
        state.groups.entry(group.clone()).or_default().insert(id);
        tracing::debug!(connection_id = %id, group = %group, "joined group");
        true
    }

    /// Removes a connection and every membership it held. Groups left empty
    /// are pruned.
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut state = self.state.write().await;
        let Some(entry) = state.connections.remove(&id) else {
            return;
        };
        for group in &entry.groups {
            if let Some(members) = state.groups.get_mut(group) {
                members.remove(&id);
                if members.is_empty() {
                    state.groups.remove(group);
                }
            }
        }
        tracing::debug!(connection_id = %id, groups = entry.groups.len(), "connection removed");
    }

    /// Queues `frame` for every member of `group`, or for every connection
    /// when `group` is `None`. Returns how many queues accepted it.
    pub async fn deliver(&self, frame: Arc<String>, group: Option<&GroupKey>) -> usize {
        let state = self.state.read().await;
        match group {
            Some(group) => state
                .groups
                .get(group)
                .into_iter()
                .flatten()
                .filter_map(|id| state.connections.get(id).map(|entry| (id, entry)))
                .filter(|(id, entry)| self.offer(**id, entry, &frame))
                .count(),
            None => state
                .connections
                .iter()
                .filter(|(id, entry)| self.offer(**id, entry, &frame))
                .count(),
        }
    }

    /// Queues a frame for a single connection.
    pub async fn send_to(&self, id: ConnectionId, frame: Arc<String>) -> bool {
        let state = self.state.read().await;
        state
            .connections
            .get(&id)
            .is_some_and(|entry| self.offer(id, entry, &frame))
    }

    fn offer(&self, id: ConnectionId, entry: &ConnectionEntry, frame: &Arc<String>) -> bool {
        match entry.outbound.try_send(Arc::clone(frame)) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(connection_id = %id, "outbound queue full, dropping event");
                false
            }
            Err(TrySendError::Closed(_)) => false,
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.state.read().await.connections.len()
    }

    /// Members of `group`; 0 once the group has been pruned.
    pub async fn group_size(&self, group: &GroupKey) -> usize {
        self.state
            .read()
            .await
            .groups
            .get(group)
            .map_or(0, HashSet::len)
    }

    pub async fn groups_of(&self, id: ConnectionId) -> Vec<GroupKey> {
        let state = self.state.read().await;
        let mut groups: Vec<GroupKey> = state
            .connections
            .get(&id)
            .map(|entry| entry.groups.iter().cloned().collect())
            .unwrap_or_default();
        groups.sort();
        groups
    }

    /// Events dropped because a connection's queue was full.
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}
