/*!
 * Merge assembly
 *
 * Validates the configuration, resolves the selection into an ordered
 * file list, formats each file and joins the blocks with the
 * configured separator.
 */

use crate::config::MergeConfig;
use crate::error::{MergeError, Result};
use crate::format::format_file;
use crate::select::Selection;
use crate::types::FileTree;

/// Join formatted blocks with a separator.
///
/// An empty list yields the empty string and a single block is
/// returned unchanged. An empty separator concatenates blocks
/// directly.
pub fn assemble(blocks: &[String], separator: &str) -> String {
    blocks.join(separator)
}

/// Run the full merge for the current selection.
///
/// Fails without producing anything when the configuration is invalid
/// or the selection resolves to zero files.
pub fn merge(tree: &FileTree, selection: &Selection, config: &MergeConfig) -> Result<String> {
    config.validate().map_err(MergeError::Validation)?;

    let file_ids = selection.resolve_files(tree);
    if file_ids.is_empty() {
        return Err(MergeError::EmptySelection);
    }

    let blocks: Vec<String> = file_ids
        .iter()
        .filter_map(|&id| {
            let node = tree.node(id);
            node.as_file().map(|file| format_file(node, file, config))
        })
        .collect();

    Ok(assemble(&blocks, config.separator()))
}
