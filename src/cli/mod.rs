//! Command-line interface for decomment
//!
//! Three mutually exclusive input modes: a single file, a directory tree,
//! or a git repository URL.

use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{load_config, merge_cli_with_config, CliOverrides};
use crate::credentials::TerminalPrompt;
use crate::domain::{DestinationMode, PublishMode, RunStats};
use crate::process::{announce, FileProcessor};
use crate::repo::RepoFetcher;
use crate::walk::process_tree;

/// Strip comments from source files, directory trees, and git repositories
#[derive(Parser)]
#[command(name = "decomment")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "dir", "git"])))]
pub struct Cli {
    /// File to process
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Directory to process recursively
    #[arg(short, long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Git repository URL to clone and process
    #[arg(short, long, value_name = "URL")]
    git: Option<String>,

    /// Specific repo-relative files to process (with --git)
    #[arg(long, value_name = "PATH", num_args = 1.., requires = "git", conflicts_with_all = ["file", "dir"])]
    git_files: Option<Vec<String>>,

    /// Folder that receives processed files and backup copies
    #[arg(short, long, value_name = "DIR", conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Overwrite files in place, keeping .bak backups
    #[arg(long, conflicts_with = "git")]
    in_place: bool,

    /// Commit and push the stripped result back to the remote (with --git)
    #[arg(long, requires = "git", conflicts_with = "output", conflicts_with_all = ["file", "dir"])]
    publish: bool,

    /// Path to config file (decomment.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let cwd = std::env::current_dir()?;
    let config_anchor = match cli.dir.as_ref() {
        Some(dir) if dir.exists() => dir.canonicalize().unwrap_or_else(|_| cwd.clone()),
        _ => cwd,
    };
    let file_config = load_config(&config_anchor, cli.config.as_deref())?;

    let destination = if cli.in_place {
        Some(DestinationMode::InPlace)
    } else if cli.output.is_some() {
        Some(DestinationMode::Mirrored)
    } else {
        None
    };
    let config = merge_cli_with_config(
        file_config,
        CliOverrides {
            output_dir: cli.output.clone(),
            destination,
            publish: cli.publish.then_some(PublishMode::CommitAndPush),
            commit_message: None,
        },
    );

    if let Some(file) = cli.file.as_deref() {
        if !file.is_file() {
            bail!("File does not exist: {}", file.display());
        }
        let processor = FileProcessor::from_config(&config);
        let outcome = processor.process(file)?;
        announce(file, &outcome);
    } else if let Some(dir) = cli.dir.as_deref() {
        if !dir.is_dir() {
            bail!("Directory does not exist: {}", dir.display());
        }
        let processor = FileProcessor::from_config(&config);
        let stats = process_tree(dir, &processor);
        print_summary(&stats);
    } else if let Some(url) = cli.git.as_deref() {
        let prompt = TerminalPrompt;
        let fetcher = RepoFetcher::new(&prompt)?;
        let stats = fetcher.process_repo(url, cli.git_files.as_deref(), &config)?;
        print_summary(&stats);
    }

    Ok(())
}

fn print_summary(stats: &RunStats) {
    println!();
    println!(
        "Done: {} processed, {} skipped (binary), {} skipped (no rules), {} failed",
        stats.processed, stats.skipped_binary, stats.skipped_extension, stats.failed
    );
}
