//! Error types for recoverable configuration parsing.
//!
//! Drawing never fails the caller: write errors on the output sink are logged and
//! discarded. The only thing that can be rejected is a malformed border format, and
//! only when it is parsed through [`Borders::from_str`](std::str::FromStr::from_str).

use compact_str::CompactString;
use thiserror::Error;

/// Errors produced while configuring a progress bar.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The border format was not exactly three characters (begin, fill, end).
    #[error("border format {format:?} must be exactly 3 characters, got {length}")]
    InvalidBorders {
        /// The rejected format string.
        format: CompactString,
        /// Its length in characters.
        length: usize,
    },
}

impl Error {
    /// Creates an [`Error::InvalidBorders`] for the given format string.
    pub fn invalid_borders(format: &str) -> Self {
        Self::InvalidBorders {
            format: format.into(),
            length: format.chars().count(),
        }
    }
}

/// Convenience alias for results carrying this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
