//! HTTP client functionality for perfscope
//!
//! This crate provides the client side of the probe contract: a single JSON
//! POST against the target's chat endpoint through a reqwest client built
//! from the perfscope HTTP configuration.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-export main types for convenience
pub use client::{ChatClient, HttpManager};
pub use config::HttpConfig;
pub use errors::HttpError;
pub use types::{ChatRequest, ChatResponse};
