/*!
 * Utility functions for filemerge
 */

use std::io;
use std::path::Path;
use std::sync::Arc;

use ignore::WalkBuilder;
use indicatif::ProgressBar;
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::config::Config;
use crate::scanner::Scanner;

/// Count total files for progress tracking
pub fn count_files(dir: &Path, config: &Config) -> io::Result<u64> {
    let scanner = Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()));
    let mut count = 0;

    if config.respect_gitignore {
        let mut walker = WalkBuilder::new(dir);

        if let Some(gitignore_path) = &config.gitignore_path {
            walker.add_custom_ignore_filename(gitignore_path);
        }

        for entry in walker.build().filter_map(Result::ok) {
            if entry.file_type().map_or(false, |ft| ft.is_file())
                && !scanner.should_ignore(entry.path())
                && scanner.should_include(entry.path())
            {
                count += 1;
            }
        }
    } else {
        for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
            if entry.file_type().is_file()
                && !scanner.should_ignore(entry.path())
                && scanner.should_include(entry.path())
            {
                count += 1;
            }
        }
    }

    Ok(count)
}

/// Format a human-readable file size.
///
/// Base-1024 units, two decimal places with trailing zeros trimmed;
/// zero formats as "0 B".
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, UNITS[exponent])
}

/// Line, word and character counts for a piece of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStats {
    /// Number of lines
    pub lines: usize,
    /// Number of whitespace-separated words
    pub words: usize,
    /// Number of characters
    pub chars: usize,
}

/// Compute text statistics for a file's content
pub fn file_stats(content: &str) -> FileStats {
    FileStats {
        lines: content.split('\n').count(),
        words: content.split_whitespace().count(),
        chars: content.chars().count(),
    }
}

/// Characters not allowed in output filenames
static INVALID_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid filename pattern"));

/// Whether a filename contains no invalid characters
pub fn validate_filename(filename: &str) -> bool {
    !INVALID_FILENAME_CHARS.is_match(filename)
}

/// Replace invalid filename characters with underscores
pub fn sanitize_filename(filename: &str) -> String {
    INVALID_FILENAME_CHARS.replace_all(filename, "_").to_string()
}

/// Default patterns to ignore while scanning
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".gitignore",
        ".gitattributes",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Dependencies
        "node_modules",
        "bower_components",
        "package-lock.json",
        "yarn.lock",
        "vendor",
        // Build & Dist
        "dist",
        "build",
        "out",
        "release",
        "*.min.js",
        "*.min.css",
        // Python
        "__pycache__",
        ".pytest_cache",
        "venv",
        ".venv",
        "*.pyc",
        "*.egg-info",
        // Rust
        "target",
        "Cargo.lock",
        // IDEs & Editors
        ".idea",
        ".vscode",
        "*.swp",
        "*.swo",
        "*~",
        // Caches & Temp
        ".cache",
        "tmp",
        "temp",
        "logs",
        "*.log",
        // Database
        "*.sqlite",
        "*.sqlite3",
        "*.db",
    ]
});
