//! Response telemetry extraction
//!
//! The target system does not return structured telemetry, so every signal
//! here is a heuristic scan of the raw response text. Scanning never fails:
//! a body with no recognisable content yields zero counts and an empty URL
//! set.

use crate::error::Result;
use perfscope_config::{PricingConfig, TelemetryConfig};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Recommendation line emitted when no email confirmation is found
pub const EMAIL_WARNING: &str =
    "WARNING: Email notification may not have been sent. Ensure send-email tool is working properly.";

/// Signals mined from one successful response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySignals {
    pub dataset_size: u64,
    pub mcp_calls: u64,
    pub urls: BTreeSet<String>,
    pub email_confirmed: bool,
    pub tokens_used: u64,
    pub cost: f64,
    /// Lines that precede the narrative recommendations
    pub warnings: Vec<String>,
}

/// Scans a response body for telemetry signals
pub trait TelemetryExtractor: Send + Sync {
    fn extract(&self, body: &str) -> TelemetrySignals;
}

/// Per-1000-token pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    pub model_name: String,
    pub input_cost_per_1k: f64,
    pub output_cost_per_1k: f64,
    pub input_share: f64,
}

impl PricingModel {
    /// Estimated cost of `tokens`, split between input and output rates
    pub fn cost_of(&self, tokens: u64) -> f64 {
        let tokens = tokens as f64;
        let input_tokens = tokens * self.input_share;
        let output_tokens = tokens * (1.0 - self.input_share);
        (input_tokens / 1000.0 * self.input_cost_per_1k)
            + (output_tokens / 1000.0 * self.output_cost_per_1k)
    }
}

impl Default for PricingModel {
    fn default() -> Self {
        PricingConfig::default().into()
    }
}

impl From<PricingConfig> for PricingModel {
    fn from(config: PricingConfig) -> Self {
        Self {
            model_name: config.model_name,
            input_cost_per_1k: config.input_cost_per_1k,
            output_cost_per_1k: config.output_cost_per_1k,
            input_share: config.input_share,
        }
    }
}

/// What the pattern extractor looks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub dataset_field: String,
    pub tool_names: Vec<String>,
    pub url_prefix: String,
    pub pricing: PricingModel,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        TelemetryConfig::default().into()
    }
}

impl From<TelemetryConfig> for ExtractionConfig {
    fn from(config: TelemetryConfig) -> Self {
        Self {
            dataset_field: config.dataset_field,
            tool_names: config.tool_names,
            url_prefix: config.url_prefix,
            pricing: config.pricing.into(),
        }
    }
}

/// Regex and substring based extractor
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    config: ExtractionConfig,
    dataset_pattern: Regex,
    dataset_object_pattern: Regex,
    url_pattern: Regex,
}

impl PatternExtractor {
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        let field = regex::escape(&config.dataset_field);
        let dataset_pattern = Regex::new(&format!(r#""{}":\s*""#, field))?;
        let dataset_object_pattern = Regex::new(&format!(r#"\{{[^}}]*"{}"[^}}]*\}}"#, field))?;
        let url_pattern = Regex::new(&format!(r#"{}[^\s"]*"#, regex::escape(&config.url_prefix)))?;

        Ok(Self {
            config,
            dataset_pattern,
            dataset_object_pattern,
            url_pattern,
        })
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    fn email_confirmed(body: &str) -> bool {
        let lower = body.to_lowercase();
        lower.contains("email")
            && (lower.contains("sent") || lower.contains("envoyé") || lower.contains("notification"))
    }

    fn dataset_size(&self, body: &str) -> u64 {
        let direct = self.dataset_pattern.find_iter(body).count();
        if direct > 0 {
            return direct as u64;
        }
        self.dataset_object_pattern.find_iter(body).count() as u64
    }

    fn mcp_calls(&self, body: &str) -> u64 {
        self.config
            .tool_names
            .iter()
            .map(|name| body.matches(name.as_str()).count() as u64)
            .sum()
    }

    fn urls(&self, body: &str) -> BTreeSet<String> {
        self.url_pattern
            .find_iter(body)
            .map(|m| {
                m.as_str()
                    .trim_end_matches(['"', '\\', ',', ';', '.', ')', ']', '}'])
                    .to_string()
            })
            .collect()
    }
}

/// Roughly four bytes per token
pub fn estimate_tokens(body: &str) -> u64 {
    (body.len() as u64).div_ceil(4)
}

impl TelemetryExtractor for PatternExtractor {
    fn extract(&self, body: &str) -> TelemetrySignals {
        let email_confirmed = Self::email_confirmed(body);
        let warnings = if email_confirmed {
            Vec::new()
        } else {
            vec![EMAIL_WARNING.to_string()]
        };

        let tokens_used = estimate_tokens(body);
        let signals = TelemetrySignals {
            dataset_size: self.dataset_size(body),
            mcp_calls: self.mcp_calls(body),
            urls: self.urls(body),
            email_confirmed,
            tokens_used,
            cost: self.config.pricing.cost_of(tokens_used),
            warnings,
        };

        debug!(
            dataset_size = signals.dataset_size,
            mcp_calls = signals.mcp_calls,
            urls = signals.urls.len(),
            tokens = signals.tokens_used,
            "Extracted response telemetry"
        );

        signals
    }
}
