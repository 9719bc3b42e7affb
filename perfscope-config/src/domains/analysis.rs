//! Analysis and reporting configuration

use crate::error::ConfigResult;
use crate::validation::{validate_enum_choice, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Accepted cost monitoring windows
pub const TIMEFRAMES: [&str; 3] = ["hour", "day", "week"];

/// Analysis and reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory HTML summary reports are written into
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Cost monitoring window used when a caller does not pick one
    #[serde(default = "default_timeframe")]
    pub default_timeframe: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            report_dir: default_report_dir(),
            default_timeframe: default_timeframe(),
        }
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.report_dir.as_os_str().is_empty() {
            return Err(self.validation_error("report_dir cannot be empty"));
        }

        validate_required_string(&self.default_timeframe, "default_timeframe", self.domain_name())?;
        validate_enum_choice(
            &self.default_timeframe,
            &TIMEFRAMES,
            "default_timeframe",
            self.domain_name(),
        )
    }

    fn domain_name(&self) -> &'static str {
        "analysis"
    }
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_timeframe() -> String {
    "day".to_string()
}
