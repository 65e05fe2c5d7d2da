//! Domain data structures shared by the indexer, store and CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// One filesystem object recorded with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Absolute path, unique key in the store
    pub path: String,

    /// Base name component of `path`
    pub filename: String,

    /// Size in bytes
    pub size: u64,

    /// Modification time, seconds since epoch
    pub modified_time: f64,

    /// Time of the last successful upsert, seconds since epoch
    pub indexed_at: f64,
}

impl FileEntry {
    /// Build an entry from a path and its metadata
    ///
    /// `indexed_at` is left at zero; the store stamps it on upsert.
    pub fn from_metadata(path: &Path, metadata: &std::fs::Metadata) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let modified_time = metadata
            .modified()
            .ok()
            .map(epoch_seconds)
            .unwrap_or(0.0);

        Self {
            path: path.to_string_lossy().into_owned(),
            filename,
            size: metadata.len(),
            modified_time,
            indexed_at: 0.0,
        }
    }
}

/// Seconds since the Unix epoch as a float
pub fn epoch_seconds(time: SystemTime) -> f64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => -e.duration().as_secs_f64(),
    }
}

/// Current time in seconds since the Unix epoch
pub fn now_seconds() -> f64 {
    epoch_seconds(SystemTime::now())
}

/// Result of one indexing run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexStats {
    /// Entries successfully written to the store
    pub files_indexed: usize,

    /// Entries the store rejected
    pub files_failed: usize,

    /// Roots that were fully or partially scanned
    pub roots_scanned: usize,

    /// True if the run stopped on a cancellation request
    pub cancelled: bool,

    pub duration_ms: u64,
}

/// Summary of the persisted index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub location: String,
    pub entry_count: usize,
    pub size_bytes: u64,
    /// Most recent `indexed_at` across all entries
    pub last_indexed_at: Option<f64>,
}
