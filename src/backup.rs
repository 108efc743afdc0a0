//! Pre-transformation backup copies.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Copy `source` to its backup location before any mutation: either
/// `<dest_folder>/<basename>` (creating the folder as needed) or a `.bak`
/// sibling next to the source. Returns the backup path.
pub fn backup_file(source: &Path, dest_folder: Option<&Path>) -> Result<PathBuf> {
    let backup_path = match dest_folder {
        Some(folder) => {
            fs::create_dir_all(folder)
                .with_context(|| format!("failed to create {}", folder.display()))?;
            let name = source
                .file_name()
                .with_context(|| format!("{} has no file name", source.display()))?;
            folder.join(name)
        }
        None => bak_sibling(source),
    };
    fs::copy(source, &backup_path).with_context(|| {
        format!("failed to copy {} to {}", source.display(), backup_path.display())
    })?;
    Ok(backup_path)
}

fn bak_sibling(source: &Path) -> PathBuf {
    let mut path = source.as_os_str().to_os_string();
    path.push(".bak");
    PathBuf::from(path)
}
