//! Listener registry
//!
//! Tracks the set of registered global listeners. Zero listeners is a
//! valid state; the dispatcher simply delivers to nobody. Registration
//! and removal are safe while a delivery round is in flight: the pump
//! works from a snapshot, so membership changes take effect on the next
//! round.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use nimbusdrive_core::ports::IGlobalListener;

/// Token identifying one registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concurrent set of registered global listeners
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: DashMap<ListenerId, Arc<dyn IGlobalListener>>,
}

impl ListenerRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    /// Registers a listener and returns its removal token
    pub fn add(&self, listener: Arc<dyn IGlobalListener>) -> ListenerId {
        let id = ListenerId::new();
        self.listeners.insert(id, listener);
        info!(listener_id = %id, count = self.listeners.len(), "Listener registered");
        id
    }

    /// Removes a listener; returns true if the token was registered
    pub fn remove(&self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            info!(listener_id = %id, count = self.listeners.len(), "Listener removed");
        } else {
            debug!(listener_id = %id, "Remove for unknown listener token");
        }
        removed
    }

    /// Returns the listeners registered right now, for one delivery round
    pub fn snapshot(&self) -> Vec<Arc<dyn IGlobalListener>> {
        self.listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Returns the number of registered listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns true if no listener is registered
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
