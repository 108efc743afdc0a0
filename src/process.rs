//! Per-file pipeline: classify, back up, strip, write.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::backup::backup_file;
use crate::domain::{Config, DestinationMode, Outcome, StripMode};
use crate::strip;
use crate::utils::{is_text_file, read_to_string_strict};

/// Drives one file through classify → back up → read → strip → write.
/// A processor is configured once per run and reused for every file.
pub struct FileProcessor {
    /// Mirror folder for backup copies; `None` writes `.bak` siblings.
    backup_dir: Option<PathBuf>,
    /// Mirror folder for stripped output; `None` overwrites in place.
    write_dir: Option<PathBuf>,
}

impl FileProcessor {
    pub fn new(backup_dir: Option<PathBuf>, write_dir: Option<PathBuf>) -> Self {
        Self { backup_dir, write_dir }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.destination {
            DestinationMode::InPlace => Self::new(None, None),
            DestinationMode::Mirrored => Self::new(
                Some(config.output_dir.clone()),
                Some(config.output_dir.clone()),
            ),
        }
    }

    /// Process a single file. Skips are `Ok`; only backup-through-write
    /// failures surface as errors, and callers report them without
    /// aborting the surrounding batch.
    pub fn process(&self, path: &Path) -> Result<Outcome> {
        if !is_text_file(path) {
            debug!(path = %path.display(), "skipping binary file");
            return Ok(Outcome::SkippedBinary);
        }

        let Some(extension) = extension_of(path) else {
            debug!(path = %path.display(), "skipping file without extension");
            return Ok(Outcome::SkippedExtension);
        };
        let Some(mode) = strip::mode_for(&extension) else {
            debug!(path = %path.display(), extension = %extension, "no comment rules for extension");
            return Ok(Outcome::SkippedExtension);
        };

        // Policy: a failed backup is reported but does not abort the
        // transform.
        if let Err(err) = backup_file(path, self.backup_dir.as_deref()) {
            warn!(path = %path.display(), "backup failed: {err:#}");
            eprintln!("Warning: backup failed for {}: {err:#}", path.display());
        }

        let source = read_to_string_strict(path)?;
        let stripped = strip::strip(mode, &source, &extension)?;

        let destination = self.destination_for(path)?;
        fs::write(&destination, stripped)
            .with_context(|| format!("failed to write {}", destination.display()))?;
        Ok(Outcome::Processed { destination, mode })
    }

    fn destination_for(&self, path: &Path) -> Result<PathBuf> {
        match &self.write_dir {
            Some(folder) => {
                fs::create_dir_all(folder)
                    .with_context(|| format!("failed to create {}", folder.display()))?;
                let name = path
                    .file_name()
                    .with_context(|| format!("{} has no file name", path.display()))?;
                Ok(folder.join(name))
            }
            None => Ok(path.to_path_buf()),
        }
    }
}

/// Print the per-file success report. Skips stay silent, like the
/// processor that produced them.
pub fn announce(source: &Path, outcome: &Outcome) {
    match outcome {
        Outcome::Processed { destination, mode: StripMode::Syntax } => {
            println!("Processed safely: {} -> {}", source.display(), destination.display());
        }
        Outcome::Processed { destination, mode: StripMode::Pattern } => {
            println!("Processed: {} -> {}", source.display(), destination.display());
        }
        Outcome::SkippedBinary | Outcome::SkippedExtension => {}
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
}
