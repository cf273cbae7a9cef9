//! Persisted transaction counter.
//!
//! Another process owns this file; it is read once at startup and never written here.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Read-only view of the last known transaction count.
#[derive(Debug, Clone, Default)]
pub struct TransactionCountStore {
    path: Option<PathBuf>,
}

impl TransactionCountStore {
    /// Store backed by `path`. `None` means nothing was ever persisted.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The persisted count. Missing or malformed content yields `None`.
    pub fn load(&self) -> Option<u64> {
        let path = self.path.as_ref()?;

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No persisted transaction count");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Cannot read transaction count");
                return None;
            }
        };

        match contents.trim().parse::<u64>() {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Malformed transaction count");
                None
            }
        }
    }
}
