/*!
 * Configuration handling for filemerge
 */

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{MergeError, Result};
use crate::utils::validate_filename;

/// Separator used between file blocks when none is configured
pub const DEFAULT_SEPARATOR: &str = "\n\n";

/// Output container format for the merged document
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Txt,
    Md,
    Html,
    Json,
    Xml,
    Csv,
    Pdf,
}

impl OutputFormat {
    /// File extension appended to the output base name
    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    /// MIME type of the produced artifact
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain",
            Self::Md => "text/markdown",
            Self::Html => "text/html",
            Self::Json => "application/json",
            Self::Xml => "application/xml",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
        }
    }
}

/// Declared text encoding label attached to the artifact.
///
/// Content is already-decoded text by the time it reaches the merge
/// engine, so no transcoding happens; this is metadata only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Display, EnumString, Serialize, Deserialize,
)]
pub enum Encoding {
    #[value(name = "utf-8")]
    #[strum(serialize = "utf-8")]
    #[serde(rename = "utf-8")]
    Utf8,
    #[value(name = "ascii")]
    #[strum(serialize = "ascii")]
    #[serde(rename = "ascii")]
    Ascii,
    #[value(name = "latin1")]
    #[strum(serialize = "latin1")]
    #[serde(rename = "latin1")]
    Latin1,
}

/// Command-line arguments for filemerge
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filemerge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Merge selected files from a directory tree into a single document",
    long_about = "Scans a directory, builds a file tree, and merges the selected files' \
                  textual content into one output document (txt, md, html, json, xml, csv \
                  or a paginated pdf) with configurable separators and headers."
)]
pub struct Args {
    /// Target directory to process
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Base name of the output file (extension appended from the format)
    #[clap(default_value = "merged")]
    pub output_name: String,

    /// Directory the output artifact is written to
    #[clap(long, default_value = ".")]
    pub output_dir: String,

    /// Output format of the merged document
    #[clap(long, value_enum, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,

    /// Declared encoding label for the artifact
    #[clap(long, value_enum, default_value_t = Encoding::Utf8)]
    pub encoding: Encoding,

    /// Separator inserted between file blocks (default: blank line)
    #[clap(long)]
    pub separator: Option<String>,

    /// Emit a banner header with each file's name
    #[clap(long)]
    pub filenames: bool,

    /// Emit a metadata block (path, size, type, format, modified) per file
    #[clap(long)]
    pub headers: bool,

    /// Preserve folder structure in the output (reserved, currently no-op)
    #[clap(long)]
    pub preserve_structure: bool,

    /// Comma-separated list of patterns to ignore
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Comma-separated list of patterns to include (if specified, only matching files are included)
    #[clap(long, value_delimiter = ',')]
    pub include_patterns: Vec<String>,

    /// Number of threads to use for reading file contents
    #[clap(long, default_value = "4")]
    pub threads: usize,

    /// Respect .gitignore files (default: true)
    #[clap(long, default_value = "true")]
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    #[clap(long)]
    pub gitignore_path: Option<String>,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Configuration for one merge: what each file block looks like and
/// what container the merged text is serialized into.
///
/// Owned by the caller and passed by reference into formatting and
/// assembly calls; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Separator between consecutive file blocks; None means the
    /// blank-line default, an explicit empty string is honored as-is
    pub separator: Option<String>,
    /// Emit a banner header per file
    pub include_filenames: bool,
    /// Emit a metadata block per file
    pub include_headers: bool,
    /// Reserved flag for structural nesting in the output; accepted
    /// and validated, no distinct behavior yet
    pub preserve_structure: bool,
    /// Output container format
    pub output_format: OutputFormat,
    /// Declared encoding label
    pub encoding: Encoding,
    /// Output artifact base name, extension appended by the serializer
    pub filename: String,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            separator: None,
            include_filenames: false,
            include_headers: false,
            preserve_structure: false,
            output_format: OutputFormat::Txt,
            encoding: Encoding::Utf8,
            filename: "merged".to_string(),
        }
    }
}

impl MergeConfig {
    /// Effective separator for block assembly
    pub fn separator(&self) -> &str {
        self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR)
    }

    /// Validate the configuration before a merge proceeds.
    ///
    /// Returns every violated rule as a human-readable message; the
    /// caller decides how to present them. A merge never starts on a
    /// non-empty violation list.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.filename.trim().is_empty() {
            errors.push("Filename is required".to_string());
        } else if !validate_filename(self.filename.trim()) {
            errors.push("Filename contains invalid characters".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Target directory to process
    pub target_dir: PathBuf,

    /// Directory the output artifact is written to
    pub output_dir: PathBuf,

    /// Patterns to ignore
    pub ignore_patterns: Vec<String>,

    /// Patterns to include (if empty, include all)
    pub include_patterns: Vec<String>,

    /// Number of threads to use for processing
    pub num_threads: usize,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,

    /// Path to custom .gitignore file
    pub gitignore_path: Option<PathBuf>,

    /// Merge configuration handed to the engine
    pub merge: MergeConfig,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            output_dir: PathBuf::from(args.output_dir),
            ignore_patterns: args.ignore_patterns,
            include_patterns: args.include_patterns,
            num_threads: args.threads,
            respect_gitignore: args.respect_gitignore,
            gitignore_path: args.gitignore_path.map(PathBuf::from),
            merge: MergeConfig {
                separator: args.separator,
                include_filenames: args.filenames,
                include_headers: args.headers,
                preserve_structure: args.preserve_structure,
                output_format: args.format,
                encoding: args.encoding,
                filename: args.output_name,
            },
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() || !self.target_dir.is_dir() {
            return Err(MergeError::PathNotFound(format!(
                "Target directory not found: {}",
                self.target_dir.display()
            )));
        }

        if !self.output_dir.exists() || !self.output_dir.is_dir() {
            return Err(MergeError::PathNotFound(format!(
                "Output directory not found: {}",
                self.output_dir.display()
            )));
        }

        if let Some(path) = &self.gitignore_path {
            if !path.exists() {
                return Err(MergeError::PathNotFound(format!(
                    "Custom .gitignore file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
