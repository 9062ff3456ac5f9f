/*!
 * File tree construction from a flat file list
 *
 * Consumes acquired files in input order and produces a rooted forest.
 * Folder nodes are created once per path prefix through a single
 * path-keyed lookup; files are appended to their final level as-is.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::classify::classify;
use crate::error::AcquisitionWarning;
use crate::types::{FileData, FileTree, FolderData, Node, NodeId, NodeKind};

/// Raw content handed over by the acquisition surface
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// Already-decoded text content
    Text(String),
    /// Opaque binary content, represented by a placeholder in output
    Binary,
    /// Acquisition failed with the given reason
    Unavailable(String),
}

/// One acquired file, the input boundary of the merge engine
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the selection root, segments joined by `/`
    pub relative_path: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time, if known
    pub modified: Option<DateTime<Utc>>,
    /// File content or the reason it is missing
    pub content: ContentSource,
}

/// Placeholder content for binary files
fn binary_placeholder(name: &str) -> String {
    format!("[Binary file: {}]", name)
}

/// Build a forest from a flat file list.
///
/// Acquisition failures are collected as warnings and leave the
/// affected file's content unset; the build continues for the
/// remaining files. Given the same input sequence, the resulting
/// forest shape and all node IDs are identical.
pub fn build_tree(files: Vec<SourceFile>) -> (FileTree, Vec<AcquisitionWarning>) {
    let mut tree = FileTree::default();
    let mut folders: HashMap<String, NodeId> = HashMap::new();
    let mut warnings = Vec::new();

    for file in files {
        let segments: Vec<&str> = file
            .relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let Some((&file_name, folder_segments)) = segments.split_last() else {
            continue;
        };

        // Look up or create the folder chain for the path prefix
        let mut current_path = String::new();
        let mut parent: Option<NodeId> = None;
        for segment in folder_segments {
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(segment);

            let folder_id = match folders.get(&current_path) {
                Some(id) => *id,
                None => {
                    let id = NodeId(tree.nodes.len());
                    tree.nodes.push(Node {
                        id,
                        name: segment.to_string(),
                        path: current_path.clone(),
                        kind: NodeKind::Folder(FolderData::default()),
                    });
                    attach(&mut tree, parent, id);
                    folders.insert(current_path.clone(), id);
                    id
                }
            };
            parent = Some(folder_id);
        }

        let classification = classify(file_name);
        let content = if classification.is_binary {
            Some(binary_placeholder(file_name))
        } else {
            match file.content {
                ContentSource::Text(text) => Some(text),
                ContentSource::Binary => Some(binary_placeholder(file_name)),
                ContentSource::Unavailable(reason) => {
                    warnings.push(AcquisitionWarning {
                        path: file.relative_path.clone(),
                        reason,
                    });
                    None
                }
            }
        };

        let id = NodeId(tree.nodes.len());
        tree.nodes.push(Node {
            id,
            name: file_name.to_string(),
            path: file.relative_path.clone(),
            kind: NodeKind::File(FileData {
                extension: classification.extension,
                category: classification.category,
                size: file.size,
                content,
                modified: file.modified,
            }),
        });
        attach(&mut tree, parent, id);
    }

    (tree, warnings)
}

/// Append a node to its parent's children, or to the roots
fn attach(tree: &mut FileTree, parent: Option<NodeId>, id: NodeId) {
    match parent {
        Some(parent_id) => match &mut tree.nodes[parent_id.index()].kind {
            NodeKind::Folder(data) => data.children.push(id),
            NodeKind::File(_) => unreachable!("files never act as parents"),
        },
        None => tree.roots.push(id),
    }
}
