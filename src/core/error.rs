//! Error types for the currency table and its file codecs.

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by table operations and codecs.
#[derive(Debug, Error)]
pub enum CurrencyError {
    /// Caller input is malformed or out of range (negative amount, unknown code, bad rate).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A file could not be opened, read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was readable but its contents do not follow the expected layout.
    #[error("Corrupt data: {0}")]
    CorruptData(String),
}

impl CurrencyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CurrencyError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CurrencyError>;
