/*!
 * Directory acquisition
 *
 * Walks the target directory and produces the flat, ordered file list
 * the tree builder consumes. Contents are read in parallel; the output
 * order always follows the walk order, not completion order.
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use glob_match::glob_match;
use ignore::WalkBuilder;
use indicatif::ProgressBar;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::classify::is_binary_file;
use crate::config::Config;
use crate::ensure;
use crate::error::Result;
use crate::tree::{ContentSource, SourceFile};
use crate::utils::DEFAULT_IGNORE;

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Scan the target directory into a flat file list.
    ///
    /// Directories are visited before files at each level; the
    /// resulting order is deterministic for a given directory state
    /// and defines the acquisition order of the tree builder.
    pub fn scan(&self) -> Result<Vec<SourceFile>> {
        let abs_path = fs::canonicalize(&self.config.target_dir)?;
        ensure!(
            abs_path.is_dir(),
            Scanner,
            "not a directory: {}",
            abs_path.display()
        );

        let mut entries = Vec::new();
        self.collect_entries(&abs_path, Path::new(""), &mut entries)?;

        // Read contents in parallel; par_iter keeps the walk order
        let files = entries
            .par_iter()
            .map(|(abs, rel)| self.acquire(abs, rel))
            .collect();

        Ok(files)
    }

    /// Collect (absolute, relative) file paths under one directory level
    fn collect_entries(
        &self,
        abs_path: &Path,
        rel_path: &Path,
        entries: &mut Vec<(PathBuf, String)>,
    ) -> Result<()> {
        let level: Vec<PathBuf> = if self.config.respect_gitignore {
            let mut walker = WalkBuilder::new(abs_path);
            walker.max_depth(Some(1));

            if let Some(gitignore_path) = &self.config.gitignore_path {
                walker.add_custom_ignore_filename(gitignore_path);
            }

            walker
                .build()
                .filter_map(std::result::Result::ok)
                .filter(|e| e.path() != abs_path)
                .filter(|e| !self.should_ignore(e.path()))
                .filter(|e| self.should_include(e.path()))
                .map(|e| e.path().to_path_buf())
                .collect()
        } else {
            WalkDir::new(abs_path)
                .max_depth(1)
                .min_depth(1)
                .into_iter()
                .filter_map(std::result::Result::ok)
                .filter(|e| !self.should_ignore(e.path()))
                .filter(|e| self.should_include(e.path()))
                .map(|e| e.path().to_path_buf())
                .collect()
        };

        let (dirs, files): (Vec<_>, Vec<_>) = level.into_iter().partition(|p| p.is_dir());

        for dir in dirs {
            let name = dir.file_name().unwrap_or_default().to_string_lossy();
            let new_rel = rel_path.join(name.as_ref());
            if let Err(e) = self.collect_entries(&dir, &new_rel, entries) {
                eprintln!("Error processing directory {}: {}", dir.display(), e);
            }
        }

        for file in files {
            let name = file.file_name().unwrap_or_default().to_string_lossy();
            let rel = rel_path
                .join(name.as_ref())
                .to_string_lossy()
                .replace('\\', "/");
            entries.push((file, rel));
        }

        Ok(())
    }

    /// Acquire one file: metadata plus content or the failure reason
    fn acquire(&self, abs_path: &Path, rel_path: &str) -> SourceFile {
        self.progress.inc(1);

        let file_name = abs_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        // Truncate long names to avoid display issues
        let display_name = if file_name.len() > 40 {
            format!("...{}", &file_name[file_name.len().saturating_sub(37)..])
        } else {
            file_name.clone()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));

        let (size, modified) = match fs::metadata(abs_path) {
            Ok(meta) => (
                meta.len(),
                meta.modified().ok().map(DateTime::<Utc>::from),
            ),
            Err(_) => (0, None),
        };

        let content = if is_binary_file(&file_name) {
            ContentSource::Binary
        } else {
            match fs::read_to_string(abs_path) {
                Ok(text) => ContentSource::Text(text),
                Err(e) => ContentSource::Unavailable(e.to_string()),
            }
        };

        SourceFile {
            relative_path: rel_path.to_string(),
            size,
            modified,
            content,
        }
    }

    /// Check if a file should be ignored based on patterns and defaults
    pub fn should_ignore(&self, path: &Path) -> bool {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        for pattern in &self.config.ignore_patterns {
            if glob_match(pattern, &file_name) {
                return true;
            }
        }

        if DEFAULT_IGNORE.iter().any(|&p| p == file_name) {
            return true;
        }

        // Don't process a previously produced artifact
        let artifact_name = format!(
            "{}.{}",
            self.config.merge.filename,
            self.config.merge.output_format.extension()
        );
        if file_name == artifact_name.as_str() {
            return true;
        }

        false
    }

    /// Check if a file should be included based on patterns
    pub fn should_include(&self, path: &Path) -> bool {
        if self.config.include_patterns.is_empty() {
            return true;
        }

        // Directories stay traversable; include patterns apply to files
        if path.is_dir() {
            return true;
        }

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        for pattern in &self.config.include_patterns {
            if glob_match(pattern, &file_name) {
                return true;
            }
        }

        false
    }
}
