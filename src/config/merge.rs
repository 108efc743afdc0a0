//! CLI argument merging with config

use crate::domain::{Config, DestinationMode, PublishMode};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub destination: Option<DestinationMode>,
    pub publish: Option<PublishMode>,
    pub commit_message: Option<String>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(output_dir) = cli.output_dir {
        base_config.output_dir = output_dir;
    }
    if let Some(destination) = cli.destination {
        base_config.destination = destination;
    }
    if let Some(publish) = cli.publish {
        base_config.publish = publish;
    }
    if let Some(commit_message) = cli.commit_message {
        base_config.commit_message = commit_message;
    }
    base_config
}
