//! Error types and error handling for everyfind.
//!
//! Per-entry failures (an unreadable file, one rejected write) are
//! contained by the scanner and the indexing pipeline and only logged.
//! What reaches callers through [`Result`] is store open/close failures,
//! configuration problems and misuse of a closed store.

use thiserror::Error;

/// Result type alias for everyfind operations
pub type Result<T> = std::result::Result<T, EveryfindError>;

/// Main error type for everyfind
#[derive(Error, Debug)]
pub enum EveryfindError {
    /// Backing store unreachable, corrupt or rejecting a write
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Operation attempted on a closed store
    #[error("Index store is closed: {0}")]
    StateError(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl EveryfindError {
    /// Integration errors the caller should not try to recover from
    pub fn is_fatal(&self) -> bool {
        matches!(self, EveryfindError::StateError(_))
    }

    /// Check if the error came from the backing store
    pub fn is_storage(&self) -> bool {
        matches!(self, EveryfindError::StorageError(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            EveryfindError::InvalidPath(_)
                | EveryfindError::InvalidPattern { .. }
                | EveryfindError::ConfigError(_)
        )
    }
}

impl From<tantivy::TantivyError> for EveryfindError {
    fn from(e: tantivy::TantivyError) -> Self {
        EveryfindError::StorageError(e.to_string())
    }
}
