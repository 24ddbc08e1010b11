//! Global listener port (driving/primary port)
//!
//! The notification contract an application implements to receive
//! asynchronous state-change events from the engine. Every method is
//! optional: all have empty default bodies, so a listener implements only
//! what it needs (including nothing at all).
//!
//! ## Ownership
//!
//! Every list or object borrowed into a callback is engine-owned and valid
//! only for the duration of that call. A receiver that wants to keep data
//! past the callback's return must clone it.
//!
//! ## Delivery
//!
//! Callbacks arrive on a task the engine controls, not the caller's.
//! Each callback is atomic and non-reentrant with respect to the data it
//! receives. These are one-way, fire-and-forget notifications: none of
//! them can fail, and none of them returns a value.

use async_trait::async_trait;

use crate::domain::{Alert, ContactRequest, EngineEvent, EngineHandle, Node, User};

/// Port trait for receiving global engine notifications
///
/// Register implementations with the dispatch layer to start receiving
/// events. All methods default to no-ops.
#[async_trait]
pub trait IGlobalListener: Send + Sync {
    /// Called when one or more contacts were added or updated
    ///
    /// The list is never empty when this fires.
    async fn on_users_update(&self, _engine: &EngineHandle, _users: &[User]) {}

    /// Called when there are new or updated account alerts
    ///
    /// The engine retains ownership of the list; it is valid until this
    /// function returns. Clone the alerts you want to keep.
    async fn on_user_alerts_update(&self, _engine: &EngineHandle, _alerts: &[Alert]) {}

    /// Called when nodes in the remote tree changed
    ///
    /// `None` means the full account was reloaded or a large batch of
    /// server notifications arrived at once: treat the entire local node
    /// cache as stale instead of merging.
    async fn on_nodes_update(&self, _engine: &EngineHandle, _nodes: Option<&[Node]>) {}

    /// Called when the account was confirmed, upgraded, or downgraded
    ///
    /// Superseded by [`on_event`](Self::on_event) for new integrations;
    /// retained for compatibility.
    async fn on_account_update(&self, _engine: &EngineHandle) {}

    /// Called when contact requests changed
    ///
    /// `None` carries the same bulk-reload semantics as
    /// [`on_nodes_update`](Self::on_nodes_update).
    async fn on_contact_requests_update(
        &self,
        _engine: &EngineHandle,
        _requests: Option<&[ContactRequest]>,
    ) {
    }

    /// Called when an inconsistency was detected in the local cache
    ///
    /// The listener must respond by triggering a full resynchronization.
    async fn on_reload_needed(&self, _engine: &EngineHandle) {}

    /// Called for every generic engine event
    ///
    /// See [`EngineEvent`] for the tag taxonomy and payloads.
    async fn on_event(&self, _engine: &EngineHandle, _event: &EngineEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    // A listener overriding nothing must compile and be usable as a
    // trait object. This is the contract's "all callbacks optional"
    // guarantee.
    struct SilentListener;

    #[async_trait]
    impl IGlobalListener for SilentListener {}

    #[tokio::test]
    async fn test_empty_listener_accepts_all_callbacks() {
        let listener: Box<dyn IGlobalListener> = Box::new(SilentListener);
        let engine = EngineHandle::new("test/1.0");

        listener.on_users_update(&engine, &[]).await;
        listener.on_user_alerts_update(&engine, &[]).await;
        listener.on_nodes_update(&engine, None).await;
        listener.on_account_update(&engine).await;
        listener.on_contact_requests_update(&engine, None).await;
        listener.on_reload_needed(&engine).await;
        listener
            .on_event(&engine, &EngineEvent::Disconnect)
            .await;
    }
}
