//! Categorized failures carrying distinct process exit codes.

use thiserror::Error;

/// Whole-operation repository failures. Everything else exits with the
/// generic failure code; clap owns exit code 2 for usage errors.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("git clone failed for {url}: {reason}")]
    Clone { url: String, reason: String },

    #[error("publish failed: {0}")]
    Publish(String),
}

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_CLONE: u8 = 3;
pub const EXIT_PUBLISH: u8 = 4;

/// Map an error chain to its process exit code.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<FetchError>() {
        Some(FetchError::Clone { .. }) => EXIT_CLONE,
        Some(FetchError::Publish(_)) => EXIT_PUBLISH,
        None => EXIT_FAILURE,
    }
}
