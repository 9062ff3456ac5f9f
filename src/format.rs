/*!
 * Per-file content formatting
 *
 * Renders one file node into its formatted text block: optional banner
 * header, optional metadata block, then the content verbatim. Pure
 * functions, no I/O.
 */

use crate::classify::Category;
use crate::config::MergeConfig;
use crate::types::{FileData, Node};
use crate::utils::format_file_size;

/// Render the formatted block for a single file node.
///
/// Missing content renders as the empty string; a file never fails to
/// format.
pub fn format_file(node: &Node, file: &FileData, config: &MergeConfig) -> String {
    let mut block = String::new();

    if config.include_filenames {
        block.push_str(&banner(&node.name));
    }

    if config.include_headers {
        block.push_str(&metadata_block(node, file));
    }

    if let Some(content) = &file.content {
        block.push_str(content);
    }

    block
}

/// Three-line `=` banner: rule, `=== name ===`, rule
fn banner(name: &str) -> String {
    let rule = "=".repeat(name.len() + 8);
    format!("{}\n=== {} ===\n{}\n", rule, name, rule)
}

/// Metadata block followed by a blank line
fn metadata_block(node: &Node, file: &FileData) -> String {
    let extension = if file.extension.is_empty() {
        "unknown"
    } else {
        file.extension.as_str()
    };
    let category = match file.category {
        Category::Default => "unknown".to_string(),
        category => category.to_string(),
    };
    let modified = file
        .modified
        .map(|ts| ts.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());

    let lines = [
        format!("File: {}", node.name),
        format!("Path: {}", node.path),
        format!("Size: {}", format_file_size(file.size)),
        format!("Type: {}", extension),
        format!("Format: {}", category),
        format!("Last Modified: {}", modified),
    ];

    format!("{}\n\n", lines.join("\n"))
}
