//! Error types for rust_dge

use thiserror::Error;

/// Main error type for differential expression runs
#[derive(Error, Debug)]
pub enum DgeError {
    /// Malformed or inconsistent input table. Aborts before any computation.
    #[error("Format error: {reason}")]
    Format { reason: String },

    /// Invalid group assignment or run-time thresholds.
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: String, got: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DgeError {
    pub(crate) fn format(reason: impl Into<String>) -> Self {
        DgeError::Format {
            reason: reason.into(),
        }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        DgeError::Configuration {
            reason: reason.into(),
        }
    }
}

/// Result type alias for rust_dge operations
pub type Result<T> = std::result::Result<T, DgeError>;
