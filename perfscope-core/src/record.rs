//! Probe and load test records

use crate::narrative::Narrative;
use crate::telemetry::TelemetrySignals;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Telemetry present on every successful probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub tokens_used: u64,
    pub cost: f64,
    pub dataset_size: u64,
    pub mcp_calls: u64,
    pub email_confirmed: bool,
}

/// How a probe ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbeOutcome {
    Success { telemetry: Telemetry },
    Failure { error: String },
}

/// One probe outcome, created at completion and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    pub test_id: String,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub latency_ms: u64,
    pub outcome: ProbeOutcome,
    pub urls: BTreeSet<String>,
    pub evaluation: String,
    pub recommendations: String,
}

impl TestRecord {
    pub fn success(
        test_id: impl Into<String>,
        query: impl Into<String>,
        timestamp: DateTime<Utc>,
        latency_ms: u64,
        signals: TelemetrySignals,
        narrative: &Narrative,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            query: query.into(),
            timestamp,
            latency_ms,
            outcome: ProbeOutcome::Success {
                telemetry: Telemetry {
                    tokens_used: signals.tokens_used,
                    cost: signals.cost,
                    dataset_size: signals.dataset_size,
                    mcp_calls: signals.mcp_calls,
                    email_confirmed: signals.email_confirmed,
                },
            },
            urls: signals.urls,
            evaluation: narrative.evaluation_text(),
            recommendations: narrative.recommendations_text(),
        }
    }

    /// A failed probe; an empty error is replaced so failures always explain themselves
    pub fn failure(
        test_id: impl Into<String>,
        query: impl Into<String>,
        timestamp: DateTime<Utc>,
        latency_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown error".to_string();
        }

        Self {
            test_id: test_id.into(),
            query: query.into(),
            timestamp,
            latency_ms,
            outcome: ProbeOutcome::Failure { error },
            urls: BTreeSet::new(),
            evaluation: String::new(),
            recommendations: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Success { .. })
    }

    pub fn telemetry(&self) -> Option<&Telemetry> {
        match &self.outcome {
            ProbeOutcome::Success { telemetry } => Some(telemetry),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Failure { error } => Some(error),
            ProbeOutcome::Success { .. } => None,
        }
    }

    pub fn tokens_used(&self) -> Option<u64> {
        self.telemetry().map(|t| t.tokens_used)
    }

    pub fn cost(&self) -> Option<f64> {
        self.telemetry().map(|t| t.cost)
    }

    pub fn dataset_size(&self) -> Option<u64> {
        self.telemetry().map(|t| t.dataset_size)
    }

    pub fn mcp_calls(&self) -> Option<u64> {
        self.telemetry().map(|t| t.mcp_calls)
    }

    /// Whether the recommendations flag a missing email notification
    pub fn has_email_issue(&self) -> bool {
        self.recommendations.contains("email")
    }
}

/// Aggregate of one load test run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTestRecord {
    pub test_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_tests: usize,
    pub successful_tests: usize,
    pub failed_tests: usize,
    /// Mean latency of successful probes, zero when none succeeded
    pub average_latency_ms: f64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub concurrent_users: usize,
    pub requests_per_user: usize,
}

impl LoadTestRecord {
    /// Fold probe results into a load test record
    pub fn from_results(
        test_id: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        concurrent_users: usize,
        requests_per_user: usize,
        results: &[TestRecord],
    ) -> Self {
        let successes: Vec<(&TestRecord, &Telemetry)> = results
            .iter()
            .filter_map(|r| r.telemetry().map(|t| (r, t)))
            .collect();

        let average_latency_ms = if successes.is_empty() {
            0.0
        } else {
            successes.iter().map(|(r, _)| r.latency_ms as f64).sum::<f64>() / successes.len() as f64
        };

        Self {
            test_id: test_id.into(),
            start_time,
            end_time,
            total_tests: results.len(),
            successful_tests: successes.len(),
            failed_tests: results.len() - successes.len(),
            average_latency_ms,
            total_tokens: successes.iter().map(|(_, t)| t.tokens_used).sum(),
            total_cost: successes.iter().map(|(_, t)| t.cost).sum(),
            concurrent_users,
            requests_per_user,
        }
    }
}
