//! Utility functions

pub mod classify;
pub mod encoding;

pub use classify::is_text_file;
pub use encoding::read_to_string_strict;
