//! Notification dispatcher
//!
//! Connects the engine side (the [`Notifier`]) to registered listeners
//! through a queue and a background delivery pump.
//!
//! ## Flow
//!
//! ```text
//! engine ──→ Notifier ──→ mpsc::channel ──→ DispatchPump ──→ listeners
//! ```
//!
//! Notifications are one-way and fire-and-forget: producing one never
//! fails, and a listener has no way to report failure back. The channel
//! preserves per-producer FIFO order; the pump delivers each notification
//! to a registry snapshot sequentially, so callbacks are atomic and
//! non-reentrant with respect to the data they receive. Payload lists are
//! owned by the pump for exactly one delivery round and dropped when the
//! round ends; listeners clone what they want to keep.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use nimbusdrive_core::config::NotificationsConfig;
use nimbusdrive_core::domain::{Alert, ContactRequest, EngineEvent, EngineHandle, Node, User};

use crate::registry::ListenerRegistry;

// ============================================================================
// Queue item
// ============================================================================

/// A queued notification awaiting delivery
///
/// One variant per contract operation. The bulk forms of the node and
/// contact-request updates are the `None` payloads.
#[derive(Debug)]
pub enum GlobalNotification {
    /// One or more contacts changed; the list is never empty
    UsersUpdated(Vec<User>),
    /// New or changed account alerts
    UserAlertsUpdated(Vec<Alert>),
    /// Node changes; `None` signals a bulk change / full reload
    NodesUpdated(Option<Vec<Node>>),
    /// Account confirmed/upgraded/downgraded (legacy channel)
    AccountUpdated,
    /// Contact request changes; `None` signals a bulk change / full reload
    ContactRequestsUpdated(Option<Vec<ContactRequest>>),
    /// Local cache inconsistency; listeners must trigger a full resync
    ReloadNeeded,
    /// Generic tagged engine event
    Event(EngineEvent),
}

// ============================================================================
// Notifier (engine side)
// ============================================================================

/// Engine-side producer of notifications
///
/// Cheap to clone; every method is fire-and-forget. A closed queue (the
/// pump was dropped) is logged and the notification discarded, matching
/// the contract's failure semantics: these operations cannot fail.
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::Sender<GlobalNotification>,
    /// Whether the deprecated account-updated channel is still delivered
    legacy_account_callback: bool,
}

impl Notifier {
    /// Announces new or updated contacts
    ///
    /// An empty list is suppressed: the contract guarantees listeners a
    /// present list is never empty, so an empty one is an engine bug.
    pub async fn users_updated(&self, users: Vec<User>) {
        if users.is_empty() {
            warn!("Suppressing empty users update");
            return;
        }
        self.push(GlobalNotification::UsersUpdated(users)).await;
    }

    /// Announces new or updated account alerts
    pub async fn user_alerts_updated(&self, alerts: Vec<Alert>) {
        if alerts.is_empty() {
            warn!("Suppressing empty alerts update");
            return;
        }
        self.push(GlobalNotification::UserAlertsUpdated(alerts))
            .await;
    }

    /// Announces changed nodes
    pub async fn nodes_updated(&self, nodes: Vec<Node>) {
        if nodes.is_empty() {
            warn!("Suppressing empty nodes update");
            return;
        }
        self.push(GlobalNotification::NodesUpdated(Some(nodes)))
            .await;
    }

    /// Announces a bulk node change: listeners must treat their entire
    /// local node cache as stale
    pub async fn nodes_reloaded(&self) {
        self.push(GlobalNotification::NodesUpdated(None)).await;
    }

    /// Announces an account confirmation/upgrade/downgrade on the legacy
    /// channel
    ///
    /// Skipped entirely when the deprecated channel is disabled in
    /// configuration; new integrations consume the generic event channel.
    pub async fn account_updated(&self) {
        if !self.legacy_account_callback {
            debug!("Legacy account-updated channel disabled, skipping");
            return;
        }
        self.push(GlobalNotification::AccountUpdated).await;
    }

    /// Announces changed contact requests
    pub async fn contact_requests_updated(&self, requests: Vec<ContactRequest>) {
        if requests.is_empty() {
            warn!("Suppressing empty contact requests update");
            return;
        }
        self.push(GlobalNotification::ContactRequestsUpdated(Some(requests)))
            .await;
    }

    /// Announces a bulk contact-request change (absent-list form)
    pub async fn contact_requests_reloaded(&self) {
        self.push(GlobalNotification::ContactRequestsUpdated(None))
            .await;
    }

    /// Announces a local cache inconsistency
    pub async fn reload_needed(&self) {
        self.push(GlobalNotification::ReloadNeeded).await;
    }

    /// Announces a generic engine event
    pub async fn event(&self, event: EngineEvent) {
        self.push(GlobalNotification::Event(event)).await;
    }

    async fn push(&self, notification: GlobalNotification) {
        if let Err(err) = self.tx.send(notification).await {
            warn!(error = %err, "Dispatch queue closed, notification dropped");
        }
    }
}

// ============================================================================
// DispatchPump (listener side)
// ============================================================================

/// Background consumer delivering queued notifications to listeners
///
/// Runs until the queue closes (all [`Notifier`] clones dropped). Each
/// notification is delivered to a snapshot of the registry taken at the
/// start of its round; listeners added or removed mid-round see only
/// subsequent notifications.
pub struct DispatchPump {
    engine: EngineHandle,
    registry: Arc<ListenerRegistry>,
    rx: mpsc::Receiver<GlobalNotification>,
}

impl DispatchPump {
    /// Main delivery loop
    ///
    /// Consumes the pump; run it on its own task:
    ///
    /// ```ignore
    /// let (notifier, pump) = dispatch_channel(engine, registry, &config);
    /// tokio::spawn(pump.run());
    /// ```
    pub async fn run(mut self) {
        info!(engine = %self.engine, "Dispatch pump starting");

        while let Some(notification) = self.rx.recv().await {
            self.deliver(notification).await;
        }

        info!(engine = %self.engine, "Dispatch queue closed, pump shutting down");
    }

    /// Delivers one notification to every currently registered listener
    async fn deliver(&self, notification: GlobalNotification) {
        let listeners = self.registry.snapshot();
        if listeners.is_empty() {
            debug!(notification = ?notification, "No listeners registered, dropping");
            return;
        }

        debug!(
            listeners = listeners.len(),
            notification = ?notification,
            "Delivering notification"
        );

        match notification {
            GlobalNotification::UsersUpdated(users) => {
                for listener in &listeners {
                    listener.on_users_update(&self.engine, &users).await;
                }
            }
            GlobalNotification::UserAlertsUpdated(alerts) => {
                for listener in &listeners {
                    listener.on_user_alerts_update(&self.engine, &alerts).await;
                }
            }
            GlobalNotification::NodesUpdated(nodes) => {
                for listener in &listeners {
                    listener
                        .on_nodes_update(&self.engine, nodes.as_deref())
                        .await;
                }
            }
            GlobalNotification::AccountUpdated => {
                for listener in &listeners {
                    listener.on_account_update(&self.engine).await;
                }
            }
            GlobalNotification::ContactRequestsUpdated(requests) => {
                for listener in &listeners {
                    listener
                        .on_contact_requests_update(&self.engine, requests.as_deref())
                        .await;
                }
            }
            GlobalNotification::ReloadNeeded => {
                for listener in &listeners {
                    listener.on_reload_needed(&self.engine).await;
                }
            }
            GlobalNotification::Event(event) => {
                for listener in &listeners {
                    listener.on_event(&self.engine, &event).await;
                }
            }
        }
        // Payload lists go out of scope here: engine-owned data does not
        // outlive the delivery round.
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Creates a connected notifier/pump pair
///
/// # Arguments
/// * `engine` - Session handle carried on every callback
/// * `registry` - Shared listener registry
/// * `config` - Queue depth and legacy-channel settings
pub fn dispatch_channel(
    engine: EngineHandle,
    registry: Arc<ListenerRegistry>,
    config: &NotificationsConfig,
) -> (Notifier, DispatchPump) {
    let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));

    info!(
        engine = %engine,
        capacity = config.queue_capacity,
        legacy_account_callback = config.legacy_account_callback,
        "Creating dispatch channel"
    );

    let notifier = Notifier {
        tx,
        legacy_account_callback: config.legacy_account_callback,
    };
    let pump = DispatchPump {
        engine,
        registry,
        rx,
    };

    (notifier, pump)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use nimbusdrive_core::domain::newtypes::{Email, UserHandle};
    use nimbusdrive_core::domain::{UserChange, Visibility};
    use nimbusdrive_core::ports::IGlobalListener;

    /// Records which callbacks fired, in order
    #[derive(Default)]
    struct RecordingListener {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingListener {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }
    }

    #[async_trait]
    impl IGlobalListener for RecordingListener {
        async fn on_users_update(&self, _engine: &EngineHandle, users: &[User]) {
            self.record(format!("users:{}", users.len()));
        }

        async fn on_nodes_update(&self, _engine: &EngineHandle, nodes: Option<&[Node]>) {
            match nodes {
                Some(list) => self.record(format!("nodes:{}", list.len())),
                None => self.record("nodes:bulk"),
            }
        }

        async fn on_account_update(&self, _engine: &EngineHandle) {
            self.record("account");
        }

        async fn on_reload_needed(&self, _engine: &EngineHandle) {
            self.record("reload");
        }

        async fn on_event(&self, _engine: &EngineHandle, event: &EngineEvent) {
            self.record(format!("event:{:?}", event.kind()));
        }
    }

    fn test_user(raw: u64) -> User {
        User::new(
            UserHandle::new(raw).unwrap(),
            Email::new(format!("user{raw}@example.com")).unwrap(),
            Visibility::Visible,
            vec![UserChange::Email],
        )
        .unwrap()
    }

    fn setup() -> (Notifier, Arc<RecordingListener>, tokio::task::JoinHandle<()>) {
        let registry = Arc::new(ListenerRegistry::new());
        let listener = Arc::new(RecordingListener::default());
        registry.add(listener.clone());

        let config = NotificationsConfig::default();
        let (notifier, pump) =
            dispatch_channel(EngineHandle::new("test/1.0"), registry, &config);
        let handle = tokio::spawn(pump.run());

        (notifier, listener, handle)
    }

    #[tokio::test]
    async fn test_fifo_delivery_order() {
        let (notifier, listener, handle) = setup();

        notifier.users_updated(vec![test_user(1)]).await;
        notifier.reload_needed().await;
        notifier.event(EngineEvent::Disconnect).await;
        notifier.account_updated().await;

        drop(notifier);
        handle.await.unwrap();

        assert_eq!(
            listener.calls(),
            vec!["users:1", "reload", "event:Disconnect", "account"]
        );
    }

    #[tokio::test]
    async fn test_empty_lists_suppressed() {
        let (notifier, listener, handle) = setup();

        notifier.users_updated(vec![]).await;
        notifier.nodes_updated(vec![]).await;
        notifier.users_updated(vec![test_user(1), test_user(2)]).await;

        drop(notifier);
        handle.await.unwrap();

        // Only the non-empty update is observed
        assert_eq!(listener.calls(), vec!["users:2"]);
    }

    #[tokio::test]
    async fn test_bulk_node_form_is_none() {
        let (notifier, listener, handle) = setup();

        notifier.nodes_reloaded().await;

        drop(notifier);
        handle.await.unwrap();

        assert_eq!(listener.calls(), vec!["nodes:bulk"]);
    }

    #[tokio::test]
    async fn test_legacy_account_channel_disabled() {
        let registry = Arc::new(ListenerRegistry::new());
        let listener = Arc::new(RecordingListener::default());
        registry.add(listener.clone());

        let config = NotificationsConfig {
            legacy_account_callback: false,
            ..NotificationsConfig::default()
        };
        let (notifier, pump) =
            dispatch_channel(EngineHandle::new("test/1.0"), registry, &config);
        let handle = tokio::spawn(pump.run());

        notifier.account_updated().await;
        notifier.reload_needed().await;

        drop(notifier);
        handle.await.unwrap();

        assert_eq!(listener.calls(), vec!["reload"]);
    }

    #[tokio::test]
    async fn test_no_listeners_is_fine() {
        let registry = Arc::new(ListenerRegistry::new());
        let config = NotificationsConfig::default();
        let (notifier, pump) =
            dispatch_channel(EngineHandle::new("test/1.0"), registry, &config);
        let handle = tokio::spawn(pump.run());

        notifier.reload_needed().await;
        notifier.event(EngineEvent::MediaInfoReady).await;

        drop(notifier);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_notifier_clones_share_queue() {
        let (notifier, listener, handle) = setup();
        let second = notifier.clone();

        notifier.reload_needed().await;
        second.reload_needed().await;

        drop(notifier);
        drop(second);
        handle.await.unwrap();

        assert_eq!(listener.calls(), vec!["reload", "reload"]);
    }
}
