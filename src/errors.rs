//! Error types for snapshot ingestion and engine configuration
//!
//! Placement conflicts, empty slot lists and "no suitable capacity" are
//! ordinary results, not errors; see [`crate::placement`] and
//! [`crate::capacity`].

use thiserror::Error;

/// Errors that can occur while loading snapshots or configuration
#[derive(Debug, Error)]
pub enum CapacityError {
    /// Snapshot document could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot document is not valid JSON or has the wrong shape
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Snapshot is structurally unusable (e.g. duplicate ids)
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration value missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for capacity engine operations
pub type CapacityResult<T> = Result<T, CapacityError>;

impl From<serde_json::Error> for CapacityError {
    fn from(err: serde_json::Error) -> Self {
        CapacityError::Deserialization(err.to_string())
    }
}
