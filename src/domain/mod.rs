//! Core configuration and outcome types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where stripped output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationMode {
    /// Overwrite sources, leaving `.bak` siblings.
    InPlace,
    /// Copy results under the output folder, leaving sources untouched.
    #[default]
    Mirrored,
}

/// Whether a repository run publishes its result back to the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PublishMode {
    #[default]
    ReadOnly,
    CommitAndPush,
}

/// Which stripping engine handled a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripMode {
    /// Python syntax tree, docstring-preserving.
    Syntax,
    /// Ordered regex substitution.
    Pattern,
}

/// Per-file processing result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Processed {
        destination: PathBuf,
        mode: StripMode,
    },
    /// Null byte in the first 512 bytes, or unreadable.
    SkippedBinary,
    /// No comment rules for the file's extension.
    SkippedExtension,
}

/// Console-only counters for batch runs; nothing is retained beyond the
/// end-of-run summary line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    pub processed: usize,
    pub skipped_binary: usize,
    pub skipped_extension: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Processed { .. } => self.processed += 1,
            Outcome::SkippedBinary => self.skipped_binary += 1,
            Outcome::SkippedExtension => self.skipped_extension += 1,
        }
    }
}

/// Main configuration for decomment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Folder receiving mirrored output and backup copies.
    #[serde(default = "default_output_dir", rename = "output")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub destination: DestinationMode,

    #[serde(default)]
    pub publish: PublishMode,

    /// Commit message used when publishing stripped sources.
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            destination: DestinationMode::default(),
            publish: PublishMode::default(),
            commit_message: default_commit_message(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("processed_files")
}

fn default_commit_message() -> String {
    "Remove comments".to_string()
}
