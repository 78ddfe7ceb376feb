//! csplit — split C source files into one file per top-level definition.
//!
//! Each function or struct is written to its own file in the output
//! directory, together with the doc comment or blank line in front of it.
//! The input file is rewritten next to them as an aggregator that
//! `#include`s the generated files in their original order, keeping any text
//! that was not split out.
//!
//! Detection is line based and tuned for one project's style: return type on
//! its own line, function name at column 0, closing brace at column 0.
//!
//! Usage: `csplit -o OUT_SPLIT src/*.c`

mod chunk;
mod classify;
mod emit;
mod error;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "csplit",
    about = "Split C source files into one file per function or struct"
)]
struct Cli {
    /// Input files (glob patterns and directories supported)
    files: Vec<String>,

    /// Output directory, created if absent
    #[arg(short = 'o', long, default_value = "OUT_SPLIT")]
    output: PathBuf,

    /// Log every written file
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let inputs = expand_globs(&cli.files)?;
    if inputs.is_empty() {
        anyhow::bail!("no input files");
    }

    let report = emit::split_files(&inputs, &cli.output)
        .with_context(|| format!("failed to split into {}", cli.output.display()))?;

    for file in &report.files {
        debug!(
            "{} -> {} ({} definitions)",
            file.input.display(),
            file.aggregator.display(),
            file.definitions.len()
        );
    }
    info!(
        "Split {} files into {} definitions in {}",
        report.files.len(),
        report.definition_count(),
        cli.output.display()
    );

    Ok(())
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["c"];

/// Expand glob patterns into a list of file paths.
/// Bare directories are scanned (non-recursively) for `.c` files.
///
/// A pattern that names nothing is passed through as is, so that reading it
/// fails loudly instead of being skipped.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|p| p.is_file() && has_supported_extension(p))
                .collect();
            found.sort();
            files.extend(found);
            continue;
        }
        if !is_glob(pattern) {
            files.push(path.to_path_buf());
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    dedup_keep_order(&mut files);
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Drop repeated paths, keeping the first occurrence. Argument order is
/// significant: it decides which file gets the unsuffixed output names.
fn dedup_keep_order(files: &mut Vec<PathBuf>) {
    let mut seen = std::collections::HashSet::new();
    files.retain(|p| seen.insert(p.clone()));
}
