/*!
 * Tests for FileMerge functionality
 */

use std::fs::{self, File};
use std::io::{self, Write};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::classify::{classify, Category};
use crate::config::{Config, Encoding, MergeConfig, OutputFormat};
use crate::error::MergeError;
use crate::format::format_file;
use crate::merge::{assemble, merge};
use crate::pdf::{self, classify_line, layout_document, render_pdf, LineKind};
use crate::scanner::Scanner;
use crate::select::Selection;
use crate::serialize::serialize;
use crate::tree::{build_tree, ContentSource, SourceFile};
use crate::types::{FileTree, NodeId};
use crate::utils::{file_stats, format_file_size, sanitize_filename, validate_filename};

// Helper to create an in-memory text file input
fn text_file(path: &str, content: &str) -> SourceFile {
    SourceFile {
        relative_path: path.to_string(),
        size: content.len() as u64,
        modified: None,
        content: ContentSource::Text(content.to_string()),
    }
}

// Helper to build the forest used by most selection tests:
// a.txt, src/b.txt, src/sub/c.txt, z.txt
fn sample_tree() -> FileTree {
    let files = vec![
        text_file("a.txt", "alpha"),
        text_file("src/b.txt", "bravo"),
        text_file("src/sub/c.txt", "charlie"),
        text_file("z.txt", "zulu"),
    ];
    let (tree, warnings) = build_tree(files);
    assert!(warnings.is_empty());
    tree
}

// Helper to look up a node ID by its path
fn id_of(tree: &FileTree, path: &str) -> NodeId {
    tree.preorder()
        .find(|n| n.path == path)
        .unwrap_or_else(|| panic!("no node at {}", path))
        .id
}

fn basic_config() -> MergeConfig {
    MergeConfig {
        separator: Some("\n\n".to_string()),
        include_filenames: false,
        include_headers: false,
        preserve_structure: false,
        output_format: OutputFormat::Txt,
        encoding: Encoding::Utf8,
        filename: "out".to_string(),
    }
}

#[test]
fn test_classify_extensions() {
    assert_eq!(classify("main.rs").extension, "rs");
    assert_eq!(classify("Photo.JPG").extension, "jpg");
    assert_eq!(classify("archive.tar.gz").extension, "gz");
    assert_eq!(classify("README").extension, "");
    assert_eq!(classify(".gitignore").extension, "gitignore");
}

#[test]
fn test_classify_categories() {
    assert_eq!(classify("notes.txt").category, Category::Text);
    assert_eq!(classify("main.rs").category, Category::Code);
    assert_eq!(classify("data.json").category, Category::Data);
    assert_eq!(classify("report.pdf").category, Category::Document);
    assert_eq!(classify("logo.png").category, Category::Binary);
    assert_eq!(classify("weird.xyz").category, Category::Default);
}

#[test]
fn test_classify_binary_is_narrower_than_category() {
    // PDFs are documents by category but binary by content handling
    let pdf = classify("report.pdf");
    assert_eq!(pdf.category, Category::Document);
    assert!(pdf.is_binary);

    let svg = classify("icon.svg");
    assert_eq!(svg.category, Category::Code);
    assert!(!svg.is_binary);
}

#[test]
fn test_format_table_lookup() {
    let info = crate::classify::lookup_format("RS").unwrap();
    assert_eq!(info.category, Category::Code);
    assert_eq!(info.description, "Rust source");

    assert!(crate::classify::lookup_format("xyz").is_none());
}

#[test]
fn test_build_tree_structure() {
    let tree = sample_tree();

    // Roots in build order: a.txt, src, z.txt
    let root_names: Vec<&str> = tree
        .roots()
        .iter()
        .map(|&id| tree.node(id).name.as_str())
        .collect();
    assert_eq!(root_names, vec!["a.txt", "src", "z.txt"]);

    // src is a folder merged across both files under it
    let src = tree.node(id_of(&tree, "src"));
    assert!(src.is_folder());
    assert_eq!(src.children().len(), 2);

    // Paths address the folder chain exactly
    let c = tree.node(id_of(&tree, "src/sub/c.txt"));
    assert_eq!(c.name, "c.txt");
    assert!(c.is_file());
}

#[test]
fn test_build_tree_idempotent() {
    let first = sample_tree();
    let second = sample_tree();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.preorder().zip(second.preorder()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.path, b.path);
        assert_eq!(a.is_file(), b.is_file());
    }
}

#[test]
fn test_build_tree_binary_placeholder() {
    let files = vec![SourceFile {
        relative_path: "assets/logo.png".to_string(),
        size: 2048,
        modified: None,
        content: ContentSource::Binary,
    }];
    let (tree, warnings) = build_tree(files);
    assert!(warnings.is_empty());

    let logo = tree.node(id_of(&tree, "assets/logo.png"));
    assert_eq!(
        logo.as_file().unwrap().content.as_deref(),
        Some("[Binary file: logo.png]")
    );
}

#[test]
fn test_build_tree_acquisition_failure_is_warning() {
    let files = vec![
        text_file("good.txt", "fine"),
        SourceFile {
            relative_path: "bad.txt".to_string(),
            size: 10,
            modified: None,
            content: ContentSource::Unavailable("permission denied".to_string()),
        },
        text_file("also_good.txt", "still fine"),
    ];
    let (tree, warnings) = build_tree(files);

    // Build continues past the failed file
    assert_eq!(tree.file_count(), 3);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "bad.txt");

    let bad = tree.node(id_of(&tree, "bad.txt"));
    assert!(bad.as_file().unwrap().content.is_none());
}

#[test]
fn test_format_file_size_boundaries() {
    assert_eq!(format_file_size(0), "0 B");
    assert_eq!(format_file_size(500), "500 B");
    assert_eq!(format_file_size(1024), "1 KB");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(1_048_576), "1 MB");
    assert_eq!(format_file_size(1_073_741_824), "1 GB");
}

#[test]
fn test_filename_validation() {
    assert!(validate_filename("merged_output"));
    assert!(!validate_filename("bad/name"));
    assert!(!validate_filename("what?"));
    assert_eq!(sanitize_filename("a<b>c"), "a_b_c");
}

#[test]
fn test_file_stats() {
    let stats = file_stats("one two\nthree\n");
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.words, 3);
    assert_eq!(stats.chars, 14);
}

#[test]
fn test_toggle_file() {
    let tree = sample_tree();
    let a = id_of(&tree, "a.txt");

    let selection = Selection::empty().toggle_file(a);
    assert!(selection.contains(a));

    let selection = selection.toggle_file(a);
    assert!(!selection.contains(a));
}

#[test]
fn test_toggle_folder_selects_subtree() {
    let tree = sample_tree();
    let src = id_of(&tree, "src");

    let selection = Selection::empty().toggle_folder(&tree, src);
    assert!(selection.contains(src));
    assert!(selection.contains(id_of(&tree, "src/b.txt")));
    assert!(selection.contains(id_of(&tree, "src/sub")));
    assert!(selection.contains(id_of(&tree, "src/sub/c.txt")));
    assert_eq!(selection.len(), 4);

    // Fully selected folder toggles back to empty
    let selection = selection.toggle_folder(&tree, src);
    assert!(selection.is_empty());
}

#[test]
fn test_toggle_folder_asymmetry() {
    let tree = sample_tree();
    let src = id_of(&tree, "src");

    // All descendants but one selected: the toggle completes the
    // selection instead of clearing it.
    let partial = Selection::empty()
        .toggle_folder(&tree, src)
        .toggle_file(id_of(&tree, "src/sub/c.txt"));
    assert_eq!(partial.len(), 3);

    let completed = partial.toggle_folder(&tree, src);
    assert_eq!(completed.len(), 4);
    assert!(completed.contains(id_of(&tree, "src/sub/c.txt")));
}

#[test]
fn test_folder_select_then_file_deselect_keeps_folder() {
    let tree = sample_tree();
    let src = id_of(&tree, "src");
    let b = id_of(&tree, "src/b.txt");

    let selection = Selection::empty()
        .toggle_folder(&tree, src)
        .toggle_file(b);

    // Folder stays selected even though not all children are
    assert!(selection.contains(src));
    assert!(!selection.contains(b));
    assert!(selection.contains(id_of(&tree, "src/sub/c.txt")));
}

#[test]
fn test_resolve_files_preserves_preorder() {
    let tree = sample_tree();

    // Select in reverse order; resolution still follows the forest
    let selection = Selection::empty()
        .toggle_file(id_of(&tree, "z.txt"))
        .toggle_file(id_of(&tree, "src/sub/c.txt"))
        .toggle_file(id_of(&tree, "a.txt"));

    let resolved: Vec<&str> = selection
        .resolve_files(&tree)
        .into_iter()
        .map(|id| tree.node(id).path.as_str())
        .collect();
    assert_eq!(resolved, vec!["a.txt", "src/sub/c.txt", "z.txt"]);
}

#[test]
fn test_selected_folder_does_not_imply_files() {
    let tree = sample_tree();

    // Hand-built set containing only the folder ID resolves to nothing
    let selection = Selection::empty().toggle_file(id_of(&tree, "src"));
    assert!(selection.resolve_files(&tree).is_empty());
}

#[test]
fn test_select_all_and_counts() {
    let tree = sample_tree();
    let selection = Selection::all(&tree);

    // 4 files + 2 folders
    assert_eq!(selection.len(), 6);
    assert_eq!(selection.selected_file_count(&tree), 4);
    assert_eq!(tree.file_count(), 4);
}

#[test]
fn test_assemble_separator_rules() {
    let a = "hello".to_string();
    let b = "world".to_string();

    assert_eq!(assemble(&[], "\n\n"), "");
    assert_eq!(assemble(&[a.clone()], "--anything--"), "hello");
    assert_eq!(assemble(&[a.clone(), b.clone()], ""), "helloworld");
    assert_eq!(assemble(&[a, b], "\n\n"), "hello\n\nworld");
}

#[test]
fn test_merge_basic_scenario() {
    let (tree, _) = build_tree(vec![
        text_file("a.txt", "hello"),
        text_file("b.txt", "world"),
    ]);
    let selection = Selection::all(&tree);
    let config = basic_config();

    let merged = merge(&tree, &selection, &config).unwrap();
    assert_eq!(merged, "hello\n\nworld");

    let artifact = serialize(&merged, config.output_format, &config.filename).unwrap();
    assert_eq!(artifact.filename, "out.txt");
    assert_eq!(artifact.mime_type, "text/plain");
    assert_eq!(artifact.bytes, b"hello\n\nworld");
}

#[test]
fn test_merge_banner_rule_length() {
    let (tree, _) = build_tree(vec![text_file("a.txt", "hello")]);
    let selection = Selection::all(&tree);
    let config = MergeConfig {
        include_filenames: true,
        ..basic_config()
    };

    let merged = merge(&tree, &selection, &config).unwrap();
    let lines: Vec<&str> = merged.lines().collect();

    // Rule of '=' repeated len(name) + 8, around the banner line
    assert_eq!(lines[0], "=".repeat("a.txt".len() + 8));
    assert_eq!(lines[1], "=== a.txt ===");
    assert_eq!(lines[2], lines[0]);
    assert_eq!(lines[3], "hello");
}

#[test]
fn test_merge_metadata_headers() {
    let modified = Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap();
    let (tree, _) = build_tree(vec![SourceFile {
        relative_path: "src/b.txt".to_string(),
        size: 1536,
        modified: Some(modified),
        content: ContentSource::Text("bravo".to_string()),
    }]);
    let selection = Selection::all(&tree);
    let config = MergeConfig {
        include_headers: true,
        ..basic_config()
    };

    let merged = merge(&tree, &selection, &config).unwrap();
    assert!(merged.contains("File: b.txt\n"));
    assert!(merged.contains("Path: src/b.txt\n"));
    assert!(merged.contains("Size: 1.5 KB\n"));
    assert!(merged.contains("Type: txt\n"));
    assert!(merged.contains("Format: text\n"));
    assert!(merged.contains(&format!("Last Modified: {}", modified.to_rfc3339())));
    assert!(merged.ends_with("\n\nbravo"));
}

#[test]
fn test_merge_headers_unknown_fallbacks() {
    let (tree, _) = build_tree(vec![text_file("LICENSE", "MIT")]);
    let node = tree.node(id_of(&tree, "LICENSE"));
    let config = MergeConfig {
        include_headers: true,
        ..basic_config()
    };

    let block = format_file(node, node.as_file().unwrap(), &config);
    assert!(block.contains("Type: unknown\n"));
    assert!(block.contains("Format: unknown\n"));
    assert!(block.contains("Last Modified: unknown\n"));
}

#[test]
fn test_merge_missing_content_is_empty() {
    let (tree, _) = build_tree(vec![SourceFile {
        relative_path: "gone.txt".to_string(),
        size: 5,
        modified: None,
        content: ContentSource::Unavailable("io error".to_string()),
    }]);
    let selection = Selection::all(&tree);

    let merged = merge(&tree, &selection, &basic_config()).unwrap();
    assert_eq!(merged, "");
}

#[test]
fn test_merge_empty_selection_fails() {
    let tree = sample_tree();
    let result = merge(&tree, &Selection::empty(), &basic_config());
    assert!(matches!(result, Err(MergeError::EmptySelection)));
}

#[test]
fn test_merge_invalid_config_fails() {
    let tree = sample_tree();
    let selection = Selection::all(&tree);
    let config = MergeConfig {
        filename: "   ".to_string(),
        ..basic_config()
    };

    match merge(&tree, &selection, &config) {
        Err(MergeError::Validation(errors)) => {
            assert_eq!(errors, vec!["Filename is required".to_string()]);
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[test]
fn test_merge_custom_empty_separator() {
    let (tree, _) = build_tree(vec![
        text_file("a.txt", "hello"),
        text_file("b.txt", "world"),
    ]);
    let selection = Selection::all(&tree);
    let config = MergeConfig {
        separator: Some(String::new()),
        ..basic_config()
    };

    // Explicit empty separator is honored literally
    let merged = merge(&tree, &selection, &config).unwrap();
    assert_eq!(merged, "helloworld");
}

#[test]
fn test_preserve_structure_currently_no_op() {
    let (tree, _) = build_tree(vec![
        text_file("src/b.txt", "bravo"),
        text_file("a.txt", "alpha"),
    ]);
    let selection = Selection::all(&tree);

    let plain = merge(&tree, &selection, &basic_config()).unwrap();
    let preserved = merge(
        &tree,
        &selection,
        &MergeConfig {
            preserve_structure: true,
            ..basic_config()
        },
    )
    .unwrap();
    assert_eq!(plain, preserved);
}

#[test]
fn test_serialize_mime_map() {
    let cases = [
        (OutputFormat::Txt, "out.txt", "text/plain"),
        (OutputFormat::Md, "out.md", "text/markdown"),
        (OutputFormat::Html, "out.html", "text/html"),
        (OutputFormat::Json, "out.json", "application/json"),
        (OutputFormat::Xml, "out.xml", "application/xml"),
        (OutputFormat::Csv, "out.csv", "text/csv"),
    ];

    for (format, filename, mime) in cases {
        let artifact = serialize("content", format, "out").unwrap();
        assert_eq!(artifact.filename, filename);
        assert_eq!(artifact.mime_type, mime);
        // Non-PDF formats are byte-transparent, never validated
        assert_eq!(artifact.bytes, b"content");
    }
}

#[test]
fn test_serialize_is_byte_transparent_for_markup() {
    // No well-formedness check for markup formats
    let artifact = serialize("definitely } not { json", OutputFormat::Json, "out").unwrap();
    assert_eq!(artifact.bytes, b"definitely } not { json");
}

#[test]
fn test_serialize_rejects_blank_base_name() {
    let result = serialize("content", OutputFormat::Txt, "  ");
    assert!(matches!(result, Err(MergeError::Serialization(_))));
}

#[test]
fn test_pdf_line_classification() {
    assert_eq!(classify_line("============="), LineKind::Banner);
    assert_eq!(classify_line("=== a.txt ==="), LineKind::Banner);
    assert_eq!(classify_line("File: a.txt"), LineKind::Metadata);
    assert_eq!(classify_line("Path: src/a.txt"), LineKind::Metadata);
    assert_eq!(classify_line("Size: 1 KB"), LineKind::Metadata);
    assert_eq!(classify_line("Type: txt"), LineKind::Metadata);
    // Format and Last Modified lines are body per the layout rules
    assert_eq!(classify_line("Format: text"), LineKind::Body);
    assert_eq!(classify_line(""), LineKind::Blank);
    assert_eq!(classify_line("   "), LineKind::Blank);
    assert_eq!(classify_line("fn main() {}"), LineKind::Body);
}

#[test]
fn test_pdf_wrap_line() {
    let short = pdf::wrap_line("short line", pdf::MAX_WIDTH - 10.0);
    assert_eq!(short, vec!["short line".to_string()]);

    let long = "word ".repeat(60);
    let wrapped = pdf::wrap_line(long.trim_end(), pdf::MAX_WIDTH - 10.0);
    assert!(wrapped.len() > 1);
    for piece in &wrapped {
        assert!(piece.chars().count() <= 75);
    }

    // A single oversized token is hard-broken rather than dropped
    let giant = "x".repeat(200);
    let broken = pdf::wrap_line(&giant, pdf::MAX_WIDTH - 10.0);
    assert!(broken.len() > 1);
    assert_eq!(broken.join(""), giant);
}

#[test]
fn test_pdf_pagination() {
    let body: Vec<String> = (0..120).map(|i| format!("body line {}", i)).collect();
    let merged = body.join("\n");

    let pages = layout_document(&merged, "out", "2023-05-01 12:00:00");
    assert!(pages.len() > 1, "expected a multi-page layout");

    // First page opens with the title block
    assert!(pages[0].texts[0].text.starts_with("Merged Files: out"));
    assert!(pages[0].texts[1].text.starts_with("Generated on:"));

    // No line is ever placed past the bottom margin
    for page in &pages {
        for placed in &page.texts {
            assert!(placed.y <= pdf::PAGE_HEIGHT - pdf::MARGIN);
            assert!(placed.y >= pdf::MARGIN);
        }
    }
}

#[test]
fn test_pdf_render_magic_header() {
    let bytes = render_pdf("hello\n\nworld", "out").unwrap();
    assert!(bytes.len() > 100, "PDF output is suspiciously small");
    assert_eq!(&bytes[0..4], b"%PDF", "PDF file missing magic header");
}

// Helper function to create a test directory structure for the scanner
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("src"))?;
    fs::create_dir(temp_dir.path().join("src").join("sub"))?;

    let mut file1 = File::create(temp_dir.path().join("readme.md"))?;
    writeln!(file1, "# Test project")?;

    let mut file2 = File::create(temp_dir.path().join("src").join("main.rs"))?;
    writeln!(file2, "fn main() {{}}")?;

    let mut file3 = File::create(temp_dir.path().join("src").join("sub").join("notes.txt"))?;
    writeln!(file3, "nested notes")?;

    // Binary by extension, never read as text
    let mut png = File::create(temp_dir.path().join("logo.png"))?;
    png.write_all(&[0x89, 0x50, 0x4e, 0x47])?;

    // Ignored by the default patterns
    fs::create_dir(temp_dir.path().join(".git"))?;
    let mut git_file = File::create(temp_dir.path().join(".git").join("config"))?;
    writeln!(git_file, "[core]")?;

    Ok(temp_dir)
}

fn scanner_config(target: &std::path::Path) -> Config {
    Config {
        target_dir: target.to_path_buf(),
        output_dir: target.to_path_buf(),
        ignore_patterns: vec![],
        include_patterns: vec![],
        num_threads: 1,
        respect_gitignore: false,
        gitignore_path: None,
        merge: MergeConfig::default(),
    }
}

#[test]
fn test_scanner_basic() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = scanner_config(temp_dir.path());

    let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    let files = scanner.scan().unwrap();

    let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert!(paths.contains(&"readme.md"));
    assert!(paths.contains(&"src/main.rs"));
    assert!(paths.contains(&"src/sub/notes.txt"));
    assert!(paths.contains(&"logo.png"));

    // The .git directory is ignored by default
    assert!(!paths.iter().any(|p| p.contains(".git")));

    // Binary files are marked, not read
    let logo = files
        .iter()
        .find(|f| f.relative_path == "logo.png")
        .unwrap();
    assert!(matches!(logo.content, ContentSource::Binary));

    // Text content is fully loaded
    let readme = files
        .iter()
        .find(|f| f.relative_path == "readme.md")
        .unwrap();
    match &readme.content {
        ContentSource::Text(text) => assert!(text.contains("# Test project")),
        other => panic!("expected text content, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_scanner_ignore_patterns() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = scanner_config(temp_dir.path());
    config.ignore_patterns = vec!["*.md".to_string()];

    let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    let files = scanner.scan().unwrap();

    assert!(!files.iter().any(|f| f.relative_path.ends_with(".md")));
    assert!(files.iter().any(|f| f.relative_path == "src/main.rs"));

    Ok(())
}

#[test]
fn test_scanner_include_patterns() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let mut config = scanner_config(temp_dir.path());
    config.include_patterns = vec!["*.rs".to_string()];

    let scanner = Scanner::new(config, Arc::new(ProgressBar::hidden()));
    let files = scanner.scan().unwrap();

    let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
    assert_eq!(paths, vec!["src/main.rs"]);

    Ok(())
}

#[test]
fn test_scan_to_merge_pipeline() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let config = scanner_config(temp_dir.path());

    let scanner = Scanner::new(config.clone(), Arc::new(ProgressBar::hidden()));
    let (tree, warnings) = build_tree(scanner.scan().unwrap());
    assert!(warnings.is_empty());

    let selection = Selection::all(&tree);
    let merged = merge(&tree, &selection, &basic_config()).unwrap();

    assert!(merged.contains("# Test project"));
    assert!(merged.contains("fn main() {}"));
    assert!(merged.contains("[Binary file: logo.png]"));

    Ok(())
}
