//! Recursive directory traversal.

use std::ffi::OsStr;
use std::path::Path;
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

use crate::domain::RunStats;
use crate::process::{announce, FileProcessor};

/// Process every file under `root`, skipping `.git` subtrees so version
/// control internals are never rewritten. Traversal order is whatever the
/// filesystem yields. Per-file failures are reported and counted; they
/// never stop the walk.
pub fn process_tree(root: &Path, processor: &FileProcessor) -> RunStats {
    // Snapshot the tree up front so files created while processing (backup
    // copies, mirrored output under `root`) are not re-enumerated.
    let mut files = Vec::new();
    let entries = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_vcs_metadata(entry));
    for entry in entries {
        match entry {
            Ok(entry) if entry.file_type().is_file() => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(err) => warn!("walk error under {}: {err}", root.display()),
        }
    }

    let mut stats = RunStats::default();
    for path in &files {
        match processor.process(path) {
            Ok(outcome) => {
                announce(path, &outcome);
                stats.record(&outcome);
            }
            Err(err) => {
                stats.failed += 1;
                eprintln!("Error processing {}: {err:#}", path.display());
            }
        }
    }

    stats
}

fn is_vcs_metadata(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == OsStr::new(".git")
}

#[cfg(test)]
mod tests {
    use super::process_tree;
    use crate::process::FileProcessor;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn git_subtree_is_never_touched() {
        let dir = TempDir::new().expect("temp dir");
        let git = dir.path().join(".git");
        fs::create_dir(&git).expect("mkdir .git");
        fs::write(git.join("hook.js"), "// keep\n").expect("write hook");
        fs::write(dir.path().join("app.js"), "// note\nlet x = 1;\n").expect("write app");

        let stats = process_tree(dir.path(), &FileProcessor::new(None, None));
        assert_eq!(stats.processed, 1);
        assert_eq!(
            fs::read_to_string(git.join("hook.js")).expect("read hook"),
            "// keep\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("app.js")).expect("read app"),
            "\nlet x = 1;\n"
        );
    }

    #[test]
    fn nested_files_are_found_and_counted() {
        let dir = TempDir::new().expect("temp dir");
        let sub = dir.path().join("src").join("deep");
        fs::create_dir_all(&sub).expect("mkdirs");
        fs::write(sub.join("mod.rb"), "# gone\nputs 1\n").expect("write rb");
        fs::write(dir.path().join("blob.c"), b"\x00binary").expect("write blob");
        fs::write(dir.path().join("readme.xyz"), "// stays\n").expect("write xyz");

        let stats = process_tree(dir.path(), &FileProcessor::new(None, None));
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.skipped_binary, 1);
        assert_eq!(stats.skipped_extension, 1);
        assert_eq!(stats.failed, 0);
        assert_eq!(
            fs::read_to_string(sub.join("mod.rb")).expect("read rb"),
            "\nputs 1\n"
        );
    }

    #[test]
    fn one_bad_file_does_not_stop_the_batch() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join("bad.py"), "def broken(:\n").expect("write bad");
        fs::write(dir.path().join("good.sh"), "# gone\nls\n").expect("write good");

        let stats = process_tree(dir.path(), &FileProcessor::new(None, None));
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.processed, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("good.sh")).expect("read good"),
            "\nls\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("bad.py")).expect("read bad"),
            "def broken(:\n"
        );
    }
}
