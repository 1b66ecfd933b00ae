//! Error types for Memento
//!
//! Provides a unified error type for all store operations. Getters never
//! produce errors: a stored value that fails to decode falls back to the
//! caller's default instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using MementoError
pub type Result<T> = std::result::Result<T, MementoError>;

/// Unified error type for Memento operations
#[derive(Debug, Error)]
pub enum MementoError {
    // -------------------------------------------------------------------------
    // Load Errors
    // -------------------------------------------------------------------------
    /// The store file could not be opened, created or read
    #[error("failed to open store file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a well-formed record stream
    #[error("failed to parse store file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Persist Errors
    // -------------------------------------------------------------------------
    /// The mapping could not be written back to the store file
    #[error("failed to write store file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
