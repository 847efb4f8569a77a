//! Flat-file feedback store.
//!
//! The whole collection lives in one JSON array. Every write replaces the file
//! atomically (temp file in the same directory, fsync, rename) and appends are
//! serialized by an in-process lock, so concurrent submissions never lose each
//! other's records and readers never see a half-written file.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::feedback::NewFeedback;
use crate::models::FeedbackRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid feedback collection: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

pub struct FeedbackStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full collection. A missing file is an empty collection;
    /// unreadable or unparsable files are errors.
    pub fn load(&self) -> Result<Vec<FeedbackRecord>, StoreError> {
        let raw = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };

        serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`load`](Self::load) but degrades any failure to an empty collection.
    pub fn load_or_default(&self) -> Vec<FeedbackRecord> {
        match self.load() {
            Ok(records) => records,
            Err(e) => {
                warn!("Treating feedback store as empty: {e}");
                Vec::new()
            }
        }
    }

    pub fn count(&self) -> usize {
        self.load_or_default().len()
    }

    /// Overwrites the store with `records`.
    pub fn save(&self, records: &[FeedbackRecord]) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_err(e))?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_err(e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
                StoreError::Corrupt {
                    path: self.path.clone(),
                    source,
                }
            })?;
            writer.flush().map_err(|e| self.io_err(e))?;
        }
        tmp.as_file().sync_all().map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;

        debug!("Saved {} feedback records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Stamps `draft` with the next id and the current time, appends it and
    /// persists the collection. Returns the stored record.
    pub fn append(&self, draft: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::Poisoned)?;

        // Only an unparsable file may be replaced; an unreadable one is left alone.
        let mut records = match self.load() {
            Ok(records) => records,
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("Replacing unparsable feedback store: {e}");
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        let record = FeedbackRecord {
            id: next_id(&records),
            timestamp: Utc::now(),
            rating: draft.rating,
            review: draft.review,
            ai_response: draft.ai_response,
            summary: draft.summary,
            actions: draft.actions,
        };
        records.push(record.clone());
        self.save(&records)?;

        Ok(record)
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

/// One past the highest id in use. Equals `len + 1` for an append-only
/// collection, and stays unique if records are ever removed.
fn next_id(records: &[FeedbackRecord]) -> u64 {
    records.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
