//! HTTP error types

/// Error type for HTTP operations
///
/// A non-2xx status is not an error at this layer; it comes back as a
/// [`ChatResponse`](crate::ChatResponse) and the caller decides.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
