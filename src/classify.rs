//! File extension and category classification
//!
//! Pure lookups over static tables: given a filename, determine its
//! extension, its coarse category (used for metadata headers and the
//! report) and whether its content should be treated as binary.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Coarse classification of a file extension.
///
/// This is a labelling concept, distinct from the binary/text content
/// handling decision: a PDF is `Document` here but still binary content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Text,
    Code,
    Data,
    Document,
    Binary,
    Default,
}

/// Result of classifying a filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Lowercased extension without the leading dot, empty if none
    pub extension: String,
    /// Category of the extension
    pub category: Category,
    /// Whether file content is treated as opaque binary
    pub is_binary: bool,
}

/// Extension buckets checked in priority order
static CATEGORY_BUCKETS: Lazy<Vec<(Category, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            Category::Text,
            vec!["txt", "md", "rtf", "log", "readme", "license", "changelog"],
        ),
        (
            Category::Code,
            vec![
                "js", "jsx", "ts", "tsx", "html", "css", "scss", "sass", "py", "java", "cpp", "c",
                "h", "php", "rb", "go", "rs", "swift", "kt", "cs", "sh", "bat", "ps1",
                "dockerfile", "makefile", "svg",
            ],
        ),
        (
            Category::Data,
            vec![
                "json", "xml", "yaml", "yml", "csv", "tsv", "sql", "toml", "ini", "conf",
                "properties", "env",
            ],
        ),
        (
            Category::Document,
            vec!["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx"],
        ),
        (
            Category::Binary,
            vec![
                "png", "jpg", "jpeg", "gif", "webp", "ico", "mp4", "mp3", "wav", "avi", "mov",
                "zip", "tar", "gz", "rar", "7z", "exe", "dll", "so", "dylib", "pkg",
            ],
        ),
    ]
});

/// Extensions whose content is never read as text
static BINARY_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "exe", "dll", "so", "dylib", "pkg", "png", "jpg", "jpeg", "gif", "webp", "ico", "mp4",
        "mp3", "wav", "avi", "mov", "zip", "tar", "gz", "rar", "7z", "pdf", "doc", "docx", "xls",
        "xlsx", "ppt", "pptx",
    ]
});

/// Description metadata for a known file format
#[derive(Debug, Clone, Deserialize)]
pub struct FormatInfo {
    /// Extension without the leading dot
    pub extension: String,
    /// Category of the format
    pub category: Category,
    /// Human-readable description
    pub description: String,
}

/// Embedded format description table, queried by lowercased extension
static FORMAT_TABLE_JSON: &str = r#"[
  {"extension": "txt", "category": "text", "description": "Plain text file"},
  {"extension": "md", "category": "text", "description": "Markdown document"},
  {"extension": "rtf", "category": "text", "description": "Rich text format"},
  {"extension": "log", "category": "text", "description": "Log file"},
  {"extension": "js", "category": "code", "description": "JavaScript source"},
  {"extension": "jsx", "category": "code", "description": "React JavaScript source"},
  {"extension": "ts", "category": "code", "description": "TypeScript source"},
  {"extension": "tsx", "category": "code", "description": "React TypeScript source"},
  {"extension": "html", "category": "code", "description": "HTML document"},
  {"extension": "css", "category": "code", "description": "Stylesheet"},
  {"extension": "py", "category": "code", "description": "Python source"},
  {"extension": "java", "category": "code", "description": "Java source"},
  {"extension": "c", "category": "code", "description": "C source"},
  {"extension": "cpp", "category": "code", "description": "C++ source"},
  {"extension": "rs", "category": "code", "description": "Rust source"},
  {"extension": "go", "category": "code", "description": "Go source"},
  {"extension": "rb", "category": "code", "description": "Ruby source"},
  {"extension": "sh", "category": "code", "description": "Shell script"},
  {"extension": "json", "category": "data", "description": "JSON data"},
  {"extension": "xml", "category": "data", "description": "XML data"},
  {"extension": "yaml", "category": "data", "description": "YAML data"},
  {"extension": "yml", "category": "data", "description": "YAML data"},
  {"extension": "csv", "category": "data", "description": "Comma-separated values"},
  {"extension": "tsv", "category": "data", "description": "Tab-separated values"},
  {"extension": "sql", "category": "data", "description": "SQL script"},
  {"extension": "toml", "category": "data", "description": "TOML configuration"},
  {"extension": "ini", "category": "data", "description": "INI configuration"},
  {"extension": "pdf", "category": "document", "description": "PDF document"},
  {"extension": "doc", "category": "document", "description": "Word document"},
  {"extension": "docx", "category": "document", "description": "Word document"},
  {"extension": "xls", "category": "document", "description": "Excel spreadsheet"},
  {"extension": "xlsx", "category": "document", "description": "Excel spreadsheet"},
  {"extension": "png", "category": "binary", "description": "PNG image"},
  {"extension": "jpg", "category": "binary", "description": "JPEG image"},
  {"extension": "gif", "category": "binary", "description": "GIF image"},
  {"extension": "zip", "category": "binary", "description": "ZIP archive"},
  {"extension": "tar", "category": "binary", "description": "Tar archive"},
  {"extension": "gz", "category": "binary", "description": "Gzip archive"},
  {"extension": "exe", "category": "binary", "description": "Executable"}
]"#;

static FORMAT_TABLE: Lazy<HashMap<String, FormatInfo>> = Lazy::new(|| {
    let formats: Vec<FormatInfo> =
        serde_json::from_str(FORMAT_TABLE_JSON).expect("embedded format table is valid JSON");
    formats
        .into_iter()
        .map(|f| (f.extension.clone(), f))
        .collect()
});

/// Extract the lowercased extension from a filename.
///
/// Returns an empty string when the filename contains no dot.
pub fn file_extension(filename: &str) -> String {
    match filename.rfind('.') {
        Some(idx) => filename[idx + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Category of a filename, first matching bucket in priority order
pub fn file_category(filename: &str) -> Category {
    let extension = file_extension(filename);
    for (category, extensions) in CATEGORY_BUCKETS.iter() {
        if extensions.iter().any(|&e| e == extension) {
            return *category;
        }
    }
    Category::Default
}

/// Whether a filename's extension marks it as opaque binary content
pub fn is_binary_file(filename: &str) -> bool {
    let extension = file_extension(filename);
    BINARY_EXTENSIONS.iter().any(|&e| e == extension)
}

/// Classify a filename in one pass
pub fn classify(filename: &str) -> Classification {
    let extension = file_extension(filename);
    Classification {
        category: file_category(filename),
        is_binary: is_binary_file(filename),
        extension,
    }
}

/// Look up description metadata for an extension, case-insensitive
pub fn lookup_format(extension: &str) -> Option<&'static FormatInfo> {
    FORMAT_TABLE.get(&extension.to_lowercase())
}
