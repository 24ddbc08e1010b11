//! Node (remote file or folder) domain entity
//!
//! Nodes form the engine's remote tree. A nodes-updated notification
//! carries the new state of each affected node; removals travel in the
//! same list as tombstone entries with the `removed` flag set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::newtypes::NodeHandle;

/// Kind of a remote node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Regular file
    File,
    /// Folder
    Folder,
    /// The account's root folder
    Root,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
            NodeKind::Root => "root",
        };
        write!(f, "{}", s)
    }
}

/// A remote node as carried in a nodes-updated notification
///
/// Engine-owned while inside a callback; clone to retain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Engine handle of the node
    handle: NodeHandle,
    /// Handle of the parent folder (None for the root)
    parent: Option<NodeHandle>,
    /// Node name within its parent
    name: String,
    /// File, folder, or root
    kind: NodeKind,
    /// Size in bytes (0 for folders)
    size: u64,
    /// Remote modification time
    modified: DateTime<Utc>,
    /// Tombstone flag: the node was removed from the tree
    removed: bool,
}

impl Node {
    /// Creates a live (non-removed) node record
    pub fn new(
        handle: NodeHandle,
        parent: Option<NodeHandle>,
        name: impl Into<String>,
        kind: NodeKind,
        size: u64,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            handle,
            parent,
            name: name.into(),
            kind,
            size,
            modified,
            removed: false,
        }
    }

    /// Creates a tombstone record for a removed node
    pub fn removed(handle: NodeHandle, kind: NodeKind) -> Self {
        Self {
            handle,
            parent: None,
            name: String::new(),
            kind,
            size: 0,
            modified: Utc::now(),
            removed: true,
        }
    }

    /// Returns the node's handle
    pub fn handle(&self) -> NodeHandle {
        self.handle
    }

    /// Returns the parent folder's handle, if any
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns the node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the remote modification time
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns true if this record is a removal tombstone
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Returns true for folders and the root
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Folder | NodeKind::Root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_node(raw: u64) -> Node {
        Node::new(
            NodeHandle::new(raw).unwrap(),
            Some(NodeHandle::new(1).unwrap()),
            "report.pdf",
            NodeKind::File,
            1024,
            Utc::now(),
        )
    }

    #[test]
    fn test_new_node() {
        let node = file_node(2);
        assert_eq!(node.name(), "report.pdf");
        assert_eq!(node.size(), 1024);
        assert!(!node.is_removed());
        assert!(!node.is_container());
    }

    #[test]
    fn test_root_is_container() {
        let root = Node::new(
            NodeHandle::new(1).unwrap(),
            None,
            "",
            NodeKind::Root,
            0,
            Utc::now(),
        );
        assert!(root.is_container());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_removed_tombstone() {
        let node = Node::removed(NodeHandle::new(2).unwrap(), NodeKind::File);
        assert!(node.is_removed());
        assert_eq!(node.size(), 0);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let node = file_node(3);
        let json = serde_json::to_string(&node).unwrap();
        let parsed: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, parsed);
    }
}
