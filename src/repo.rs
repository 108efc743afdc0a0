//! Clone-and-process orchestration for remote repositories.
//!
//! The clone lives in a `TempDir` whose Drop finalizer removes it on every
//! exit path, success or failure; no temporary clone is ever left behind.
//! All git work goes through the external `git` executable so push
//! eligibility can be probed the way the tool documents it: a dry-run push
//! whose failure text decides whether credentials are needed.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;
use tracing::debug;
use which::which;

use crate::credentials::CredentialProvider;
use crate::domain::{Config, PublishMode, RunStats};
use crate::error::FetchError;
use crate::process::{announce, FileProcessor};
use crate::walk::process_tree;

/// How a remote URL can be pushed to once the dry run says "no access".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemoteKind {
    Https,
    Ssh,
    Other,
}

pub struct RepoFetcher<'a> {
    git: PathBuf,
    credentials: &'a dyn CredentialProvider,
}

impl<'a> RepoFetcher<'a> {
    pub fn new(credentials: &'a dyn CredentialProvider) -> Result<Self> {
        let git = which("git").context("git executable not found on PATH")?;
        Ok(Self { git, credentials })
    }

    /// Clone `url`, strip comments from the listed files (or the whole
    /// tree), and optionally commit and push the result.
    pub fn process_repo(
        &self,
        url: &str,
        files: Option<&[String]>,
        config: &Config,
    ) -> Result<RunStats> {
        let workspace =
            TempDir::new().context("failed to create temporary clone directory")?;
        let clone_root = workspace.path().to_path_buf();

        self.clone_into(url, &clone_root)?;

        let output_dir = absolute_output_dir(&config.output_dir)?;
        // Publishing strips in place inside the clone so the commit holds
        // the stripped sources; backups still mirror outside the clone so
        // none are staged.
        let processor = match config.publish {
            PublishMode::CommitAndPush => FileProcessor::new(Some(output_dir.clone()), None),
            PublishMode::ReadOnly => {
                FileProcessor::new(Some(output_dir.clone()), Some(output_dir.clone()))
            }
        };

        let mut stats = RunStats::default();
        match files {
            Some(listed) => {
                for relative in listed {
                    let full = clone_root.join(relative);
                    if !full.exists() {
                        eprintln!("File not found in repo: {relative}");
                        continue;
                    }
                    match processor.process(&full) {
                        Ok(outcome) => {
                            announce(&full, &outcome);
                            stats.record(&outcome);
                        }
                        Err(err) => {
                            stats.failed += 1;
                            eprintln!("Error processing {}: {err:#}", full.display());
                        }
                    }
                }
            }
            None => stats = process_tree(&clone_root, &processor),
        }

        match config.publish {
            PublishMode::CommitAndPush => {
                self.publish(&clone_root, url, &config.commit_message)?;
            }
            PublishMode::ReadOnly => {
                println!("Processed repo saved to folder: {}", output_dir.display());
            }
        }

        workspace
            .close()
            .context("failed to remove temporary clone directory")?;
        Ok(stats)
    }

    fn clone_into(&self, url: &str, dest: &Path) -> Result<()> {
        debug!(url, "cloning repository");
        let output = Command::new(&self.git)
            .arg("clone")
            .arg(url)
            .arg(dest)
            .output()
            .context("failed to launch git clone")?;
        if !output.status.success() {
            return Err(FetchError::Clone {
                url: url.to_string(),
                reason: stderr_text(&output),
            }
            .into());
        }
        Ok(())
    }

    /// Stage, commit, and push the stripped clone. An empty stage short
    /// circuits before any commit is created.
    fn publish(&self, repo: &Path, url: &str, message: &str) -> Result<()> {
        self.git_ok(repo, &["add", "-A"]).map_err(publish_error)?;

        let staged = self
            .git_stdout(repo, &["status", "--porcelain"])
            .map_err(publish_error)?;
        if staged.trim().is_empty() {
            println!("Nothing to commit.");
            return Ok(());
        }

        self.git_ok(repo, &["commit", "-m", message])
            .map_err(publish_error)?;

        let dry_run = self
            .git_output(repo, &["push", "--dry-run"])
            .map_err(publish_error)?;
        if dry_run.status.success() {
            self.git_ok(repo, &["push"]).map_err(publish_error)?;
            println!("Pushed stripped sources to {url}");
            return Ok(());
        }

        let failure = stderr_text(&dry_run);
        if !denies_write_access(&failure) {
            return Err(FetchError::Publish(format!("push --dry-run failed: {failure}")).into());
        }

        match remote_kind(url) {
            RemoteKind::Https => self.push_with_token(repo, url),
            RemoteKind::Ssh => {
                eprintln!("No write access over SSH; check your SSH key permissions for {url}");
                Ok(())
            }
            RemoteKind::Other => {
                eprintln!("Unrecognized remote URL form, skipping push: {url}");
                Ok(())
            }
        }
    }

    fn push_with_token(&self, repo: &Path, url: &str) -> Result<()> {
        let token = self.credentials.token(url).map_err(publish_error)?;
        if token.is_empty() {
            return Err(FetchError::Publish("empty access token".to_string()).into());
        }
        let authed = token_url(url, &token)
            .ok_or_else(|| FetchError::Publish(format!("not an HTTPS remote: {url}")))?;
        let branch = self
            .git_stdout(repo, &["rev-parse", "--abbrev-ref", "HEAD"])
            .map_err(publish_error)?;
        let branch = branch.trim().to_string();

        let push = self
            .git_output(repo, &["push", authed.as_str(), branch.as_str()])
            .map_err(publish_error)?;
        if !push.status.success() {
            // The token must never surface in error text.
            let masked = stderr_text(&push).replace(token.as_str(), "***");
            return Err(FetchError::Publish(format!("token push failed: {masked}")).into());
        }
        println!("Pushed stripped sources to {url}");
        Ok(())
    }

    fn git_output(&self, repo: &Path, args: &[&str]) -> Result<Output> {
        Command::new(&self.git)
            .args(args)
            .current_dir(repo)
            .output()
            .with_context(|| {
                format!("failed to launch git {}", args.first().copied().unwrap_or_default())
            })
    }

    fn git_ok(&self, repo: &Path, args: &[&str]) -> Result<()> {
        let output = self.git_output(repo, args)?;
        if !output.status.success() {
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr_text(&output));
        }
        Ok(())
    }

    fn git_stdout(&self, repo: &Path, args: &[&str]) -> Result<String> {
        let output = self.git_output(repo, args)?;
        if !output.status.success() {
            anyhow::bail!("git {} failed: {}", args.join(" "), stderr_text(&output));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn publish_error(err: anyhow::Error) -> anyhow::Error {
    anyhow::Error::from(FetchError::Publish(format!("{err:#}")))
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Failure text from a dry-run push that means "no write access" rather
/// than a broken repository: permission-denied wording or a fatal marker.
fn denies_write_access(stderr: &str) -> bool {
    let text = stderr.to_lowercase();
    text.contains("denied") || text.contains("fatal")
}

fn remote_kind(url: &str) -> RemoteKind {
    if url.starts_with("https://") {
        RemoteKind::Https
    } else if url.starts_with("git@") || url.starts_with("ssh://") {
        RemoteKind::Ssh
    } else {
        RemoteKind::Other
    }
}

/// Embed a token into an HTTPS remote URL.
fn token_url(url: &str, token: &str) -> Option<String> {
    url.strip_prefix("https://")
        .map(|rest| format!("https://{token}@{rest}"))
}

fn absolute_output_dir(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        let cwd = std::env::current_dir().context("failed to resolve current directory")?;
        Ok(cwd.join(dir))
    }
}
