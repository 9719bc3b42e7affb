//! Logging initialisation for perfscope
//!
//! Every crate in the workspace logs through `tracing` macros; this crate
//! wires a `tracing-subscriber` formatter to the configured level and format.

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
pub use perfscope_config::domains::logging::{LogFormat, LogLevel, LoggingConfig};
