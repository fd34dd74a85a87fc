//! Error types for schema parsing

use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema parsing
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Input text is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A node of the definition does not have the expected shape
    #[error("invalid JSON for {section}: {reason}")]
    InvalidJson { section: String, reason: String },
}

impl SchemaError {
    pub(crate) fn invalid(section: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidJson {
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
