//! Error types for binding generation

use binapi_core::SchemaError;
use thiserror::Error;

/// Result type alias for generation operations
pub type CodegenResult<T> = Result<T, CodegenError>;

/// Error type for binding generation
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Input file name does not carry the schema extension
    #[error("invalid input file name: {0:?}")]
    InvalidInputFile(String),

    /// Writing the generated output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The schema could not be parsed
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
