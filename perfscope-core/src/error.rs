//! Core error types for perfscope

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    /// Caller supplied input that cannot be acted on
    #[error("Validation error: {0}")]
    Validation(String),

    /// An extraction pattern built from configuration did not compile
    #[error("Invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Post-processing of collected results failed
    #[error("Aggregation failed: {0}")]
    Aggregation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
