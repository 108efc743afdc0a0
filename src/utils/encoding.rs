//! Strict text decoding for file contents.

use anyhow::{bail, Context, Result};
use encoding_rs::UTF_8;
use std::fs;
use std::path::Path;

/// Read a file as UTF-8, failing outright when the contents do not decode.
/// No replacement characters: a file that cannot round-trip must not be
/// rewritten.
pub fn read_to_string_strict(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    match UTF_8.decode_without_bom_handling_and_without_replacement(&bytes) {
        Some(text) => Ok(text.into_owned()),
        None => bail!("{} is not valid UTF-8", path.display()),
    }
}
