//! Error types for `itrack-lib`.

use thiserror::Error;

/// Primary error type for itrack-lib operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    // === Issue Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// Partial ID matches multiple issues.
    #[error("Ambiguous ID '{partial}': matches {matches:?}")]
    AmbiguousId {
        partial: String,
        matches: Vec<String>,
    },

    /// Issue ID input is unusable (empty after trimming).
    #[error("Invalid issue ID: '{id}'")]
    InvalidId { id: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Invalid status value.
    #[error("Invalid status: {status} (expected todo, in-progress or done)")]
    InvalidStatus { status: String },

    /// Invalid priority value.
    #[error("Invalid priority: {priority} (expected low, medium or high)")]
    InvalidPriority { priority: String },

    // === Slot Errors ===
    /// Slot key contains characters that cannot name a slot entry.
    #[error("Invalid slot key: '{key}'")]
    InvalidKey { key: String },

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type using `TrackerError`.
pub type Result<T> = std::result::Result<T, TrackerError>;
