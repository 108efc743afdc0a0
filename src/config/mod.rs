//! Configuration loading and merging
//!
//! File values come from `decomment.toml` (or an explicit `--config` path),
//! `DECOMMENT_*` environment variables override the file, and CLI flags
//! override both.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::path::Path;

use crate::domain::Config;

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// Config file name searched for next to the processed directory (or the
/// current directory for file and repository runs).
pub const CONFIG_FILE_NAME: &str = "decomment.toml";

pub fn load_config(anchor: &Path, explicit: Option<&Path>) -> Result<Config> {
    let base = Figment::from(Serialized::defaults(Config::default()));
    let with_file = match explicit {
        Some(path) => base.merge(Toml::file_exact(path)),
        None => base.merge(Toml::file(anchor.join(CONFIG_FILE_NAME))),
    };
    with_file
        .merge(Env::prefixed("DECOMMENT_"))
        .extract()
        .context("failed to load configuration")
}

#[cfg(test)]
mod tests {
    use super::{load_config, CONFIG_FILE_NAME};
    use crate::domain::{DestinationMode, PublishMode};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_a_config_file() {
        let dir = TempDir::new().expect("temp dir");
        let config = load_config(dir.path(), None).expect("load defaults");
        assert_eq!(config.output_dir, PathBuf::from("processed_files"));
        assert_eq!(config.destination, DestinationMode::Mirrored);
        assert_eq!(config.publish, PublishMode::ReadOnly);
        assert_eq!(config.commit_message, "Remove comments");
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "output = \"stripped\"\ncommit_message = \"Strip comments\"\n",
        )
        .expect("write config");

        let config = load_config(dir.path(), None).expect("load config");
        assert_eq!(config.output_dir, PathBuf::from("stripped"));
        assert_eq!(config.commit_message, "Strip comments");
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        assert!(load_config(dir.path(), Some(&missing)).is_err());
    }
}
