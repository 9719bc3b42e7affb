//! Domain-specific configuration modules

pub mod analysis;
pub mod http;
pub mod load;
pub mod logging;
pub mod probe;
pub mod telemetry;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main perfscope configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PerfscopeConfig {
    /// HTTP client configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Target endpoint and probe request configuration
    #[serde(default)]
    pub probe: probe::ProbeConfig,

    /// Load test defaults and limits
    #[serde(default)]
    pub load: load::LoadConfig,

    /// Response telemetry extraction and pricing
    #[serde(default)]
    pub telemetry: telemetry::TelemetryConfig,

    /// Analysis and reporting configuration
    #[serde(default)]
    pub analysis: analysis::AnalysisConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl PerfscopeConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.http.validate()?;
        self.probe.validate()?;
        self.load.validate()?;
        self.telemetry.validate()?;
        self.analysis.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = PerfscopeConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
