//! Service error types

use perfscope_config::ConfigError;
use perfscope_core::CoreError;
use perfscope_execution::ExecutionError;
use perfscope_http::HttpError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    /// Whether the caller supplied bad input, as opposed to a setup failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_)
                | ServiceError::Core(CoreError::Validation(_))
                | ServiceError::Execution(ExecutionError::ValidationError(_))
        )
    }
}
