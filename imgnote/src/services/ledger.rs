//! File-backed annotation ledger
//!
//! One pretty-printed JSON array of `AnnotationRecord` per labeling session.
//! Reads are resilient: a missing, empty, or corrupt file loads as an empty
//! ledger, never an error — absence means "nothing annotated yet". Writes
//! rewrite the whole file and are serialized behind a single-writer async
//! lock so concurrent in-process submissions cannot lose an update.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::AnnotationRecord;

/// Ledger write errors. Reads never fail by policy.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Failed to rewrite the ledger file
    #[error("Ledger write error {0}: {1}")]
    WriteError(PathBuf, String),

    /// Failed to serialize records to JSON
    #[error("Ledger serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Durable annotation store for one labeling session.
pub struct Ledger {
    path: PathBuf,
    /// Serializes the load-extend-rewrite cycle of `append_all`.
    write_lock: Mutex<()>,
}

impl Ledger {
    /// Open a ledger at the given path. The file is not touched until
    /// `ensure_exists` or the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file containing an empty array if it is missing.
    pub fn ensure_exists(&self) -> Result<(), LedgerError> {
        if !self.path.exists() {
            std::fs::write(&self.path, "[]")
                .map_err(|e| LedgerError::WriteError(self.path.clone(), e.to_string()))?;
            tracing::info!(path = %self.path.display(), "Created empty ledger file");
        }
        Ok(())
    }

    /// Load all records.
    ///
    /// A missing, empty, or structurally invalid file yields an empty
    /// sequence; corruption is logged but never surfaced to the caller.
    pub fn load(&self) -> Vec<AnnotationRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Ledger not readable, treating as empty");
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ledger file corrupt, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Set of `data_name` keys already annotated.
    pub fn done_keys(&self) -> HashSet<String> {
        self.load()
            .into_iter()
            .map(|record| record.data_name)
            .collect()
    }

    /// Append records durably: load, extend in memory, rewrite the file.
    ///
    /// Pretty-printed JSON, UTF-8 verbatim (non-ASCII text is not escaped).
    /// Mutations are serialized behind the write lock; an I/O failure is
    /// fatal for this submission only.
    pub async fn append_all(&self, records: &[AnnotationRecord]) -> Result<(), LedgerError> {
        if records.is_empty() {
            return Ok(());
        }

        let _guard = self.write_lock.lock().await;

        let mut all = self.load();
        all.extend(records.iter().cloned());

        let json = serde_json::to_string_pretty(&all)?;
        std::fs::write(&self.path, json)
            .map_err(|e| LedgerError::WriteError(self.path.clone(), e.to_string()))?;

        tracing::debug!(
            path = %self.path.display(),
            appended = records.len(),
            total = all.len(),
            "Ledger rewritten"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let ledger = Ledger::new("/nonexistent/dir/data.json");
        assert!(ledger.load().is_empty());
        assert!(ledger.done_keys().is_empty());
    }

    #[test]
    fn test_load_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "   \n").unwrap();

        let ledger = Ledger::new(&path);
        assert!(ledger.load().is_empty());
    }
}
