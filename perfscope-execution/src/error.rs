//! Error types for probe execution

use thiserror::Error;

/// Execution errors
///
/// Probe failures are never errors; they are recorded as failed
/// [`TestRecord`](perfscope_core::TestRecord)s.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Worker error: {0}")]
    WorkerError(String),
}

impl From<tokio::task::JoinError> for ExecutionError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::WorkerError(err.to_string())
    }
}

/// Result type for execution operations
pub type ExecutionResult<T> = Result<T, ExecutionError>;
