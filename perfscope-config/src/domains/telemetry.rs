//! Telemetry extraction and pricing configuration
//!
//! The scanning heuristics are approximations of what the target system
//! prints; they live here so a format change upstream is a config edit.

use crate::error::ConfigResult;
use crate::validation::{validate_fraction, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Response scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// JSON field name that marks one dataset element
    #[serde(default = "default_dataset_field")]
    pub dataset_field: String,

    /// Tool names whose literal occurrences count as tool invocations
    #[serde(default = "default_tool_names")]
    pub tool_names: Vec<String>,

    /// Host prefix of URLs worth collecting
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Token pricing used for the cost estimate
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Per-1000-token pricing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Model the rates belong to
    #[serde(default = "default_model_name")]
    pub model_name: String,

    #[serde(default = "default_input_cost_per_1k")]
    pub input_cost_per_1k: f64,

    #[serde(default = "default_output_cost_per_1k")]
    pub output_cost_per_1k: f64,

    /// Share of estimated tokens attributed to the input side
    #[serde(default = "default_input_share")]
    pub input_share: f64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            dataset_field: default_dataset_field(),
            tool_names: default_tool_names(),
            url_prefix: default_url_prefix(),
            pricing: PricingConfig::default(),
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            input_cost_per_1k: default_input_cost_per_1k(),
            output_cost_per_1k: default_output_cost_per_1k(),
            input_share: default_input_share(),
        }
    }
}

impl Validatable for TelemetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.dataset_field, "dataset_field", self.domain_name())?;
        validate_required_string(&self.url_prefix, "url_prefix", self.domain_name())?;

        if self.tool_names.iter().any(|name| name.trim().is_empty()) {
            return Err(self.validation_error("tool_names cannot contain empty entries"));
        }

        self.pricing.validate()
    }

    fn domain_name(&self) -> &'static str {
        "telemetry"
    }
}

impl Validatable for PricingConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.model_name, "model_name", self.domain_name())?;

        if self.input_cost_per_1k < 0.0 || self.output_cost_per_1k < 0.0 {
            return Err(self.validation_error("token rates cannot be negative"));
        }

        validate_fraction(self.input_share, "input_share", self.domain_name())
    }

    fn domain_name(&self) -> &'static str {
        "telemetry.pricing"
    }
}

fn default_dataset_field() -> String {
    "Input".to_string()
}

fn default_tool_names() -> Vec<String> {
    ["get_markdown", "get_raw_text", "get_rendered_html", "send-email"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_url_prefix() -> String {
    "https://www.discoveryintech.com".to_string()
}

fn default_model_name() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_input_cost_per_1k() -> f64 {
    0.05
}

fn default_output_cost_per_1k() -> f64 {
    0.08
}

fn default_input_share() -> f64 {
    0.7
}
