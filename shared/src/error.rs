//! Error types for the advisory engine and its store

use thiserror::Error;

/// Errors raised by the advisory engine, the store and the exporters
#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// Rejected before any computation runs
    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("Corrupt '{key}' entry in store: {source}")]
    CorruptEntry {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Export error: {0}")]
    Export(String),
}

impl AdvisoryError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        AdvisoryError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Field name for input errors, used to point the UI at the offending control
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AdvisoryError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result alias used across the shared crate
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;
