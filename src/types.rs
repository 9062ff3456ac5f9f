/*!
 * Core types and data structures for the file tree
 *
 * Nodes live in a flat arena owned by `FileTree`; parents reference
 * children by `NodeId` index. This keeps traversal iterative (explicit
 * stack, no recursion) and makes repeated builds on the same input
 * produce identical IDs.
 */

use chrono::{DateTime, Utc};

use crate::classify::Category;

/// Index of a node in the tree arena.
///
/// IDs are assigned in creation order: files in acquisition order,
/// folders at first sight of their path prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Raw arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// File-specific node data
#[derive(Debug, Clone)]
pub struct FileData {
    /// Lowercased extension without the leading dot, empty if none
    pub extension: String,
    /// Category of the extension
    pub category: Category,
    /// Size in bytes
    pub size: u64,
    /// Decoded text content, binary placeholder, or None if unloaded
    pub content: Option<String>,
    /// Last modification time, if known
    pub modified: Option<DateTime<Utc>>,
}

/// Folder-specific node data
#[derive(Debug, Clone, Default)]
pub struct FolderData {
    /// Children in build order (first-seen order, files and folders mixed)
    pub children: Vec<NodeId>,
}

/// Payload distinguishing files from folders
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Regular file
    File(FileData),
    /// Folder containing other nodes
    Folder(FolderData),
}

/// A single entry in the file tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Arena index of this node
    pub id: NodeId,
    /// Final path segment
    pub name: String,
    /// Full relative path, segments joined by `/`
    pub path: String,
    /// File or folder payload
    pub kind: NodeKind,
}

impl Node {
    /// Whether this node is a file
    pub fn is_file(&self) -> bool {
        matches!(self.kind, NodeKind::File(_))
    }

    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder(_))
    }

    /// File payload, if this node is a file
    pub fn as_file(&self) -> Option<&FileData> {
        match &self.kind {
            NodeKind::File(data) => Some(data),
            NodeKind::Folder(_) => None,
        }
    }

    /// Children of this node; empty for files
    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder(data) => &data.children,
            NodeKind::File(_) => &[],
        }
    }
}

/// A rooted forest of file and folder nodes in arena storage
#[derive(Debug, Clone, Default)]
pub struct FileTree {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl FileTree {
    /// Node for the given ID
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Top-level nodes in build order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes (files and folders)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no nodes at all
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of file nodes in the whole forest
    pub fn file_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_file()).count()
    }

    /// Depth-first pre-order traversal over the whole forest
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder::new(self, self.roots.iter().rev().copied().collect())
    }

    /// Pre-order IDs of a node and its whole subtree, the node first
    pub fn subtree_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            ids.push(current);
            for child in self.node(current).children().iter().rev() {
                stack.push(*child);
            }
        }
        ids
    }
}

/// Iterative pre-order iterator over a `FileTree`
pub struct Preorder<'a> {
    tree: &'a FileTree,
    stack: Vec<NodeId>,
}

impl<'a> Preorder<'a> {
    fn new(tree: &'a FileTree, stack: Vec<NodeId>) -> Self {
        Self { tree, stack }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        for child in node.children().iter().rev() {
            self.stack.push(*child);
        }
        Some(node)
    }
}
