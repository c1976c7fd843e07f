use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

/// Everything that can stop a conversion run.
///
/// Malformed tag lines and unparsable ratings never show up here: those
/// fields just fall back to their empty/zero defaults.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Failed to open PGN file '{}': {source}", .path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open CSV file '{}': {source}", .path.display())]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to allocate memory for moves: {0}")]
    Alloc(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
