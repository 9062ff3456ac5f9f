/*!
 * Command-line interface for FileMerge
 */

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;

use filemerge::config::{Args, Config};
use filemerge::error::Result;
use filemerge::merge::merge;
use filemerge::report::{MergeReport, ReportFormat, Reporter};
use filemerge::scanner::Scanner;
use filemerge::select::Selection;
use filemerge::serialize::{save_artifact, serialize};
use filemerge::tree::build_tree;
use filemerge::utils::{count_files, file_stats};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Generate shell completions and exit if requested
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "filemerge", &mut io::stdout());
        return Ok(());
    }

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        eprintln!("Warning: Failed to set thread pool size: {}", e);
    }

    // Create progress bar
    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) Elapsed: {elapsed_precise}")
            .unwrap(),
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Setup");

    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    // Count files for progress tracking
    let total_files = match count_files(&config.target_dir, &config) {
        Ok(count) => {
            progress.set_message(format!("🔎 Found {} files to process", count));
            count
        }
        Err(e) => {
            progress.set_message(format!("⚠️ Warning: Failed to count files: {}", e));
            0
        }
    };

    progress.set_length(total_files);
    progress.set_prefix("📊 Processing");
    progress.set_message("Starting scan...");

    let start_time = Instant::now();

    // Acquire files and build the tree
    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()));
    let source_files = scanner.scan()?;
    let (tree, warnings) = build_tree(source_files);

    for warning in &warnings {
        progress.suspend(|| eprintln!("Warning: could not read {}", warning));
    }

    // The CLI merges everything the scanner accepted
    let selection = Selection::all(&tree);

    progress.set_message("Merging selected files...");
    let merged = merge(&tree, &selection, &config.merge)?;

    progress.set_message("Serializing output...");
    let artifact = serialize(
        &merged,
        config.merge.output_format,
        config.merge.filename.trim(),
    )?;
    let output_path = save_artifact(&artifact, &config.output_dir)?;

    let total_duration = start_time.elapsed();
    progress.finish_and_clear();

    // Collect per-file statistics for the report
    let mut file_details = HashMap::new();
    let mut total = filemerge::utils::FileStats::default();
    for id in selection.resolve_files(&tree) {
        let node = tree.node(id);
        if let Some(file) = node.as_file() {
            let stats = file_stats(file.content.as_deref().unwrap_or(""));
            total.lines += stats.lines;
            total.words += stats.words;
            total.chars += stats.chars;
            file_details.insert(node.path.clone(), stats);
        }
    }

    let report = MergeReport {
        output_file: output_path.display().to_string(),
        duration: total_duration,
        files_merged: file_details.len(),
        total_lines: total.lines,
        total_words: total.words,
        total_chars: total.chars,
        artifact_size: artifact.bytes.len() as u64,
        warnings: warnings.len(),
        file_details,
    };

    let reporter = Reporter::new(ReportFormat::ConsoleTable);
    reporter.print_report(&report);

    Ok(())
}
