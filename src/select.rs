/*!
 * Selection set semantics
 *
 * The selection is a plain set of node IDs owned by the caller. Every
 * operation is a pure function of (tree, current set, target) and
 * returns a new set, so the semantics are testable without any UI.
 */

use std::collections::HashSet;

use crate::types::{FileTree, NodeId};

/// Set of node IDs (files and folders) marked for inclusion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<NodeId>,
}

impl Selection {
    /// Empty selection
    pub fn empty() -> Self {
        Self::default()
    }

    /// Selection covering every file and folder in the forest
    pub fn all(tree: &FileTree) -> Self {
        Self {
            ids: tree.preorder().map(|n| n.id).collect(),
        }
    }

    /// Whether the given node ID is a member
    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of member IDs, files and folders alike
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no IDs are selected
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of a single file ID
    pub fn toggle_file(&self, id: NodeId) -> Self {
        let mut ids = self.ids.clone();
        if !ids.remove(&id) {
            ids.insert(id);
        }
        Self { ids }
    }

    /// Toggle a folder and its whole subtree.
    ///
    /// If every descendant ID (the folder's own included) is already a
    /// member, all of them are removed. In any other state all of them
    /// are added: a partially selected folder becomes fully selected,
    /// not deselected. The asymmetry is deliberate and matched by the
    /// UI this engine was built for.
    pub fn toggle_folder(&self, tree: &FileTree, folder_id: NodeId) -> Self {
        let descendant_ids = tree.subtree_ids(folder_id);
        let fully_selected = descendant_ids.iter().all(|id| self.ids.contains(id));

        let mut ids = self.ids.clone();
        if fully_selected {
            for id in &descendant_ids {
                ids.remove(id);
            }
        } else {
            ids.extend(descendant_ids);
        }
        Self { ids }
    }

    /// Resolve the selection into file IDs in forest pre-order.
    ///
    /// Only file nodes whose own IDs are members are emitted; a
    /// selected folder does not by itself imply its files.
    pub fn resolve_files(&self, tree: &FileTree) -> Vec<NodeId> {
        tree.preorder()
            .filter(|n| n.is_file() && self.ids.contains(&n.id))
            .map(|n| n.id)
            .collect()
    }

    /// Number of selected file nodes, a derived read
    pub fn selected_file_count(&self, tree: &FileTree) -> usize {
        self.resolve_files(tree).len()
    }
}
