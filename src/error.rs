//! Error types for the `itrack` CLI.
//!
//! Library failures arrive as [`TrackerError`] and are wrapped; the variants
//! added here cover workspace and configuration problems that only exist at
//! the command-line layer.

use itrack_lib::TrackerError;
use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `itrack` commands.
#[derive(Error, Debug)]
pub enum ItrackError {
    // === Workspace Errors ===
    /// No `.itrack` workspace was found.
    #[error("itrack not initialized: run 'itrack init' first")]
    NotInitialized,

    /// `init` found an existing workspace.
    #[error("Already initialized at '{path}'")]
    AlreadyInitialized { path: PathBuf },

    // === Configuration Errors ===
    /// Configuration value is unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // === Store Errors ===
    #[error(transparent)]
    Store(#[from] TrackerError),

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ItrackError {
    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run: itrack init"),
            Self::AlreadyInitialized { .. } => Some("Use --force to reinitialize"),
            Self::Store(TrackerError::AmbiguousId { .. }) => {
                Some("Provide more characters of the ID")
            }
            Self::Store(TrackerError::InvalidStatus { .. }) => {
                Some("Valid statuses: todo, in-progress, done")
            }
            Self::Store(TrackerError::InvalidPriority { .. }) => {
                Some("Valid priorities: low, medium, high")
            }
            _ => None,
        }
    }

    /// Create a validation error for a specific field.
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Store(TrackerError::validation(field, reason))
    }
}

/// Result type using `ItrackError`.
pub type Result<T> = std::result::Result<T, ItrackError>;
