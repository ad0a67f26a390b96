//! Persistence errors
//!
//! The simulation itself never fails; only loading and saving JSON
//! (settings, progress, opponent tables) can.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error reading or writing a stored JSON document
#[derive(Debug)]
pub enum StoreError {
    /// File could not be read or written
    Io {
        /// File involved
        path: PathBuf,
        source: io::Error,
    },
    /// Document was not valid JSON for the expected shape
    Parse(serde_json::Error),
}

impl StoreError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            StoreError::Parse(err) => write!(f, "invalid JSON: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err)
    }
}
