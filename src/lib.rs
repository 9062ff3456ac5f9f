/*!
 * FileMerge - Merge selected files from a directory tree into one document
 *
 * This library builds a hierarchical file-tree model from a flat file
 * list, resolves a selection of nodes into an ordered file list, and
 * merges the selected files' textual content into a single output
 * document (txt, md, html, json, xml, csv or paginated pdf).
 */

pub mod classify;
pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod pdf;
pub mod report;
pub mod scanner;
pub mod select;
pub mod serialize;
pub mod tree;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use classify::{classify, Category, Classification};
pub use config::{Args, Config, Encoding, MergeConfig, OutputFormat};
pub use error::{AcquisitionWarning, MergeError, Result};
pub use merge::{assemble, merge};
pub use report::{MergeReport, ReportFormat, Reporter};
pub use scanner::Scanner;
pub use select::Selection;
pub use serialize::{serialize, Artifact};
pub use tree::{build_tree, ContentSource, SourceFile};
pub use types::{FileTree, Node, NodeId, NodeKind};
pub use utils::{count_files, file_stats, format_file_size};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
