//! Node cache view
//!
//! [`NodeCacheView`] is a listener that mirrors the engine's node tree
//! from nodes-updated notifications. Incremental lists are merged by
//! handle; the absent-list form and reload-needed both mean the mirror is
//! no longer trustworthy, so the view discards everything and asks the
//! engine for a full resynchronization instead of merging.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, info, warn};

use nimbusdrive_core::domain::newtypes::NodeHandle;
use nimbusdrive_core::domain::{EngineEvent, EngineHandle, Node};
use nimbusdrive_core::ports::{IGlobalListener, IResyncTrigger};

/// Listener mirroring the remote node tree
///
/// Clones every node it keeps: payload lists are engine-owned and only
/// valid during the callback.
pub struct NodeCacheView {
    /// Node mirror keyed by handle
    nodes: DashMap<NodeHandle, Node>,
    /// Set while the mirror is known stale (bulk signal received and the
    /// refetched state has not caught up yet)
    stale: AtomicBool,
    /// Resync request channel back to the engine
    resync: Arc<dyn IResyncTrigger>,
}

impl NodeCacheView {
    /// Creates an empty view wired to a resync trigger
    pub fn new(resync: Arc<dyn IResyncTrigger>) -> Self {
        Self {
            nodes: DashMap::new(),
            stale: AtomicBool::new(false),
            resync,
        }
    }

    /// Returns the mirrored node for a handle, if present
    pub fn get(&self, handle: NodeHandle) -> Option<Node> {
        self.nodes.get(&handle).map(|entry| entry.value().clone())
    }

    /// Returns the number of mirrored nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the mirror holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns true while the mirror is known stale
    pub fn is_stale(&self) -> bool {
        self.stale.load(Ordering::Acquire)
    }

    /// Discards the mirror and requests a full resync from the engine
    async fn invalidate(&self, cause: &str) {
        let dropped = self.nodes.len();
        self.nodes.clear();
        self.stale.store(true, Ordering::Release);

        info!(cause, dropped, "Node cache invalidated, requesting full resync");

        if let Err(err) = self.resync.request_full_resync().await {
            warn!(error = %err, "Full resync request failed");
        }
    }

    /// Merges one incremental node list into the mirror
    fn apply(&self, nodes: &[Node]) {
        let mut upserts = 0usize;
        let mut removals = 0usize;

        for node in nodes {
            if node.is_removed() {
                self.nodes.remove(&node.handle());
                removals += 1;
            } else {
                self.nodes.insert(node.handle(), node.clone());
                upserts += 1;
            }
        }

        debug!(upserts, removals, total = self.nodes.len(), "Applied node update");
    }
}

#[async_trait]
impl IGlobalListener for NodeCacheView {
    async fn on_nodes_update(&self, _engine: &EngineHandle, nodes: Option<&[Node]>) {
        match nodes {
            Some(list) => self.apply(list),
            None => self.invalidate("bulk nodes update").await,
        }
    }

    async fn on_reload_needed(&self, _engine: &EngineHandle) {
        self.invalidate("reload needed").await;
    }

    async fn on_event(&self, _engine: &EngineHandle, event: &EngineEvent) {
        if matches!(event, EngineEvent::NodesCurrent) {
            // External sync has caught up; the mirror is trustworthy again.
            self.stale.store(false, Ordering::Release);
            debug!(total = self.nodes.len(), "Node cache current");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    use chrono::Utc;
    use nimbusdrive_core::domain::NodeKind;

    #[derive(Default)]
    struct CountingResync {
        requests: AtomicU64,
    }

    impl CountingResync {
        fn requests(&self) -> u64 {
            self.requests.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IResyncTrigger for CountingResync {
        async fn request_full_resync(&self) -> anyhow::Result<()> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn file_node(raw: u64) -> Node {
        Node::new(
            NodeHandle::new(raw).unwrap(),
            Some(NodeHandle::new(1).unwrap()),
            format!("file{raw}.txt"),
            NodeKind::File,
            raw * 100,
            Utc::now(),
        )
    }

    fn setup() -> (NodeCacheView, Arc<CountingResync>, EngineHandle) {
        let resync = Arc::new(CountingResync::default());
        let view = NodeCacheView::new(resync.clone());
        (view, resync, EngineHandle::new("test/1.0"))
    }

    #[tokio::test]
    async fn test_incremental_merge() {
        let (view, resync, engine) = setup();

        view.on_nodes_update(&engine, Some(&[file_node(2), file_node(3)]))
            .await;
        assert_eq!(view.len(), 2);
        assert_eq!(
            view.get(NodeHandle::new(2).unwrap()).unwrap().name(),
            "file2.txt"
        );
        assert_eq!(resync.requests(), 0);
        assert!(!view.is_stale());
    }

    #[tokio::test]
    async fn test_tombstone_removes() {
        let (view, _resync, engine) = setup();

        view.on_nodes_update(&engine, Some(&[file_node(2)])).await;
        view.on_nodes_update(
            &engine,
            Some(&[Node::removed(NodeHandle::new(2).unwrap(), NodeKind::File)]),
        )
        .await;

        assert!(view.is_empty());
    }

    #[tokio::test]
    async fn test_absent_list_invalidates_and_resyncs() {
        let (view, resync, engine) = setup();

        view.on_nodes_update(&engine, Some(&[file_node(2), file_node(3)]))
            .await;
        view.on_nodes_update(&engine, None).await;

        // Not a merge: everything is discarded and a resync requested
        assert!(view.is_empty());
        assert!(view.is_stale());
        assert_eq!(resync.requests(), 1);
    }

    #[tokio::test]
    async fn test_reload_needed_invalidates_and_resyncs() {
        let (view, resync, engine) = setup();

        view.on_nodes_update(&engine, Some(&[file_node(2)])).await;
        view.on_reload_needed(&engine).await;

        assert!(view.is_empty());
        assert!(view.is_stale());
        assert_eq!(resync.requests(), 1);
    }

    #[tokio::test]
    async fn test_nodes_current_clears_stale() {
        let (view, _resync, engine) = setup();

        view.on_nodes_update(&engine, None).await;
        assert!(view.is_stale());

        // Refetched state arrives, then the catch-up marker
        view.on_nodes_update(&engine, Some(&[file_node(2)])).await;
        view.on_event(&engine, &EngineEvent::NodesCurrent).await;

        assert!(!view.is_stale());
        assert_eq!(view.len(), 1);
    }

    #[tokio::test]
    async fn test_unrelated_events_ignored() {
        let (view, _resync, engine) = setup();

        view.on_nodes_update(&engine, None).await;
        view.on_event(&engine, &EngineEvent::MediaInfoReady).await;

        assert!(view.is_stale());
    }
}
