//! Contact mirror
//!
//! [`ContactMirror`] is a listener that keeps a local view of the
//! account's contacts and pending contact requests. Contact updates merge
//! by handle, with hidden contacts dropping out of the mirror; resolved
//! requests leave the pending set. The absent-list form of the
//! contact-requests update discards the request mirror and asks for a
//! full resync, mirroring the node-cache semantics.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use nimbusdrive_core::domain::newtypes::{RequestId, UserHandle};
use nimbusdrive_core::domain::{ContactRequest, EngineHandle, User, Visibility};
use nimbusdrive_core::ports::{IGlobalListener, IResyncTrigger};

/// Listener mirroring contacts and pending contact requests
pub struct ContactMirror {
    /// Visible contacts keyed by handle
    users: DashMap<UserHandle, User>,
    /// Pending (unresolved or reminded) requests keyed by id
    pending: DashMap<RequestId, ContactRequest>,
    /// Resync request channel back to the engine
    resync: Arc<dyn IResyncTrigger>,
}

impl ContactMirror {
    /// Creates an empty mirror wired to a resync trigger
    pub fn new(resync: Arc<dyn IResyncTrigger>) -> Self {
        Self {
            users: DashMap::new(),
            pending: DashMap::new(),
            resync,
        }
    }

    /// Returns the mirrored contact for a handle, if visible
    pub fn user(&self, handle: UserHandle) -> Option<User> {
        self.users.get(&handle).map(|entry| entry.value().clone())
    }

    /// Returns the number of visible contacts
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns the pending request with the given id, if any
    pub fn pending_request(&self, id: RequestId) -> Option<ContactRequest> {
        self.pending.get(&id).map(|entry| entry.value().clone())
    }

    /// Returns the number of pending requests
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl IGlobalListener for ContactMirror {
    async fn on_users_update(&self, _engine: &EngineHandle, users: &[User]) {
        let mut kept = 0usize;
        let mut dropped = 0usize;

        for user in users {
            // A hidden contact is a removed relationship.
            if user.visibility() == Visibility::Hidden {
                self.users.remove(&user.handle());
                dropped += 1;
            } else {
                self.users.insert(user.handle(), user.clone());
                kept += 1;
            }
        }

        debug!(kept, dropped, total = self.users.len(), "Applied contact update");
    }

    async fn on_contact_requests_update(
        &self,
        _engine: &EngineHandle,
        requests: Option<&[ContactRequest]>,
    ) {
        let Some(list) = requests else {
            let dropped = self.pending.len();
            self.pending.clear();
            info!(dropped, "Contact request mirror invalidated, requesting full resync");
            if let Err(err) = self.resync.request_full_resync().await {
                warn!(error = %err, "Full resync request failed");
            }
            return;
        };

        for request in list {
            if request.status().is_pending() {
                self.pending.insert(request.id(), request.clone());
            } else {
                self.pending.remove(&request.id());
            }
        }

        debug!(pending = self.pending.len(), "Applied contact request update");
    }
}
