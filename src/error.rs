//! Error types for mangacache

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for mangacache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Opaque error produced by a [`ChapterSource`](crate::ChapterSource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for mangacache
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Persisted data could not be decoded. The file is left as it was.
    #[error("Failed to parse cached entry '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Freshly produced data violates the entry schema and was not written.
    #[error("Invalid cache entry: {reason}")]
    InvalidEntry { reason: String },

    // -------------------------------------------------------------------------
    // Navigation Errors
    // -------------------------------------------------------------------------
    #[error("Not found: {0}")]
    NotFound(String),

    // -------------------------------------------------------------------------
    // Source Errors
    // -------------------------------------------------------------------------
    #[error("Source request failed: {0}")]
    Network(#[source] SourceError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid cache strategy: {0}")]
    InvalidCacheStrategy(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if persisted data was unreadable
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Check if the error came from the chapter source
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns across the store modules.

/// Create a directory (and parents) with proper error handling
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove a file, treating a missing file as success
pub fn remove_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::FileDelete {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
