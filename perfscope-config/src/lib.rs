//! Domain-driven configuration management for perfscope
//!
//! This crate provides modular configuration split by functional domains,
//! with validation, defaults, and environment variable support.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    analysis::AnalysisConfig, http::HttpConfig, load::LoadConfig, logging::LoggingConfig,
    probe::ProbeConfig, telemetry::PricingConfig, telemetry::TelemetryConfig, PerfscopeConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
pub use validation::Validatable;
