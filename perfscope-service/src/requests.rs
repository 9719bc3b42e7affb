//! Typed request payloads
//!
//! Field names deserialise from camelCase. Optional fields fall back to the
//! service configuration when absent.

use crate::error::{ServiceError, ServiceResult};
use perfscope_analysis::Timeframe;
use perfscope_core::scenarios;
use serde::{Deserialize, Serialize};

fn default_success() -> bool {
    true
}

fn default_scenarios() -> Vec<String> {
    vec![scenarios::ALL.to_string()]
}

fn require_non_blank(value: &str, field: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn validate_optional_url(url: Option<&str>) -> ServiceResult<()> {
    match url {
        Some(url) => require_non_blank(url, "targetUrl"),
        None => Ok(()),
    }
}

/// Run one probe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunProbeRequest {
    pub query: String,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub test_id: Option<String>,
}

impl RunProbeRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(target_url.into());
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn validate(&self) -> ServiceResult<()> {
        require_non_blank(&self.query, "query")?;
        validate_optional_url(self.target_url.as_deref())?;
        if let Some(id) = &self.test_id {
            require_non_blank(id, "testId")?;
        }
        Ok(())
    }
}

/// Fan a set of queries out over concurrent virtual users
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLoadRequest {
    pub queries: Vec<String>,
    #[serde(default)]
    pub concurrent_users: Option<usize>,
    #[serde(default)]
    pub requests_per_user: Option<usize>,
    #[serde(default)]
    pub target_url: Option<String>,
}

impl RunLoadRequest {
    pub fn new<S: Into<String>>(queries: impl IntoIterator<Item = S>) -> Self {
        Self {
            queries: queries.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_users(mut self, concurrent_users: usize, requests_per_user: usize) -> Self {
        self.concurrent_users = Some(concurrent_users);
        self.requests_per_user = Some(requests_per_user);
        self
    }

    pub fn with_target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = Some(target_url.into());
        self
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if self.queries.is_empty() {
            return Err(ServiceError::Validation(
                "queries must contain at least one query".to_string(),
            ));
        }
        if self.queries.iter().any(|q| q.trim().is_empty()) {
            return Err(ServiceError::Validation(
                "queries cannot contain empty entries".to_string(),
            ));
        }
        if self.concurrent_users == Some(0) {
            return Err(ServiceError::Validation(
                "concurrentUsers must be at least 1".to_string(),
            ));
        }
        if self.requests_per_user == Some(0) {
            return Err(ServiceError::Validation(
                "requestsPerUser must be at least 1".to_string(),
            ));
        }
        validate_optional_url(self.target_url.as_deref())
    }
}

/// Summarise stored probes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Restrict to these ids; all records when absent or empty
    #[serde(default)]
    pub test_ids: Option<Vec<String>>,
    #[serde(default)]
    pub generate_report: bool,
    #[serde(default)]
    pub compare_with_standards: bool,
}

impl AnalyzeRequest {
    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(ids) = &self.test_ids {
            for id in ids {
                require_non_blank(id, "testIds")?;
            }
        }
        Ok(())
    }
}

/// Cost report over a recent window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorCostsRequest {
    /// `hour`, `day` or `week`, case-insensitive
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl MonitorCostsRequest {
    pub fn new(timeframe: impl Into<String>) -> Self {
        Self {
            timeframe: Some(timeframe.into()),
            model_name: None,
        }
    }

    /// Parse the requested window, or `fallback` when none was given
    pub fn timeframe_or(&self, fallback: &str) -> ServiceResult<Timeframe> {
        let raw = self.timeframe.as_deref().unwrap_or(fallback);
        Ok(raw.parse::<Timeframe>()?)
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(timeframe) = &self.timeframe {
            timeframe.parse::<Timeframe>()?;
        }
        if let Some(model) = &self.model_name {
            require_non_blank(model, "modelName")?;
        }
        Ok(())
    }
}

/// Grade metrics against industry standards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    /// Stored record whose values fill metrics not given explicitly
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
    #[serde(default)]
    pub tokens_used: Option<u64>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub dataset_size: Option<u64>,
    #[serde(default = "default_success")]
    pub success: bool,
}

impl Default for CompareRequest {
    fn default() -> Self {
        Self {
            test_id: None,
            latency_ms: None,
            tokens_used: None,
            cost: None,
            dataset_size: None,
            success: default_success(),
        }
    }
}

impl CompareRequest {
    pub fn for_test(test_id: impl Into<String>) -> Self {
        Self {
            test_id: Some(test_id.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> ServiceResult<()> {
        if let Some(cost) = self.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(ServiceError::Validation(
                    "cost must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(id) = &self.test_id {
            require_non_blank(id, "testId")?;
        }
        Ok(())
    }
}

/// Run named scenarios sequentially
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkRequest {
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<String>,
    #[serde(default)]
    pub target_url: Option<String>,
}

impl Default for BenchmarkRequest {
    fn default() -> Self {
        Self {
            scenarios: default_scenarios(),
            target_url: None,
        }
    }
}

impl BenchmarkRequest {
    pub fn validate(&self) -> ServiceResult<()> {
        if self.scenarios.is_empty() {
            return Err(ServiceError::Validation(
                "scenarios must name at least one scenario".to_string(),
            ));
        }
        validate_optional_url(self.target_url.as_deref())
    }
}
