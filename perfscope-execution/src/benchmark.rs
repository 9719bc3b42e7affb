//! Scenario benchmarking

use crate::probe::ProbeExecutor;
use chrono::{DateTime, Utc};
use perfscope_core::{ids, scenarios, TestRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// One scenario's probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub record: TestRecord,
}

/// Aggregate over the successful scenarios of a benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSummary {
    pub average_latency_ms: f64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub average_dataset_size: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub benchmark_id: String,
    pub timestamp: DateTime<Utc>,
    pub total_scenarios: usize,
    pub successful_scenarios: usize,
    pub failed_scenarios: usize,
    pub results: Vec<ScenarioResult>,
    /// Absent when no scenario succeeded
    pub summary: Option<BenchmarkSummary>,
}

/// Runs predefined scenarios one after another
pub struct ScenarioBenchmark {
    executor: Arc<ProbeExecutor>,
}

impl ScenarioBenchmark {
    pub fn new(executor: Arc<ProbeExecutor>) -> Self {
        Self { executor }
    }

    pub async fn run<S: AsRef<str>>(&self, requested: &[S], target_base_url: &str) -> BenchmarkReport {
        let benchmark_id = ids::generate("benchmark");
        let selected = scenarios::resolve(requested);

        info!(
            "Starting benchmark {} with {} scenarios",
            benchmark_id,
            selected.len()
        );

        let mut results = Vec::with_capacity(selected.len());
        for scenario in selected {
            let Some(query) = scenarios::query(scenario, self.executor.recipient()) else {
                continue;
            };
            let test_id = format!("{}_{}", benchmark_id, scenario);
            let record = self.executor.run(&query, target_base_url, &test_id).await;
            results.push(ScenarioResult {
                scenario: scenario.to_string(),
                record,
            });
        }

        let successful: Vec<&TestRecord> = results
            .iter()
            .map(|r| &r.record)
            .filter(|r| r.is_success())
            .collect();

        let summary = summarize(&successful);
        let report = BenchmarkReport {
            benchmark_id,
            timestamp: Utc::now(),
            total_scenarios: results.len(),
            successful_scenarios: successful.len(),
            failed_scenarios: results.len() - successful.len(),
            summary,
            results,
        };

        info!(
            "Benchmark {} finished: {}/{} scenarios successful",
            report.benchmark_id, report.successful_scenarios, report.total_scenarios
        );
        report
    }
}

fn summarize(successful: &[&TestRecord]) -> Option<BenchmarkSummary> {
    if successful.is_empty() {
        return None;
    }

    let n = successful.len() as f64;
    let average_latency_ms = successful.iter().map(|r| r.latency_ms as f64).sum::<f64>() / n;
    let total_tokens = successful.iter().filter_map(|r| r.tokens_used()).sum();
    let total_cost: f64 = successful.iter().filter_map(|r| r.cost()).sum();
    let average_dataset_size = successful
        .iter()
        .map(|r| r.dataset_size().unwrap_or(0) as f64)
        .sum::<f64>()
        / n;
    let email_issues = successful.iter().filter(|r| r.has_email_issue()).count();

    let mut recommendations = Vec::new();
    if average_latency_ms > 3000.0 {
        recommendations.push("Overall response time is high - consider system optimization".to_string());
    }
    if average_dataset_size < 5.0 {
        recommendations.push(
            "Average dataset size is below recommended minimum - improve content generation"
                .to_string(),
        );
    }
    if total_cost > 0.5 {
        recommendations
            .push("Total benchmark cost is high - consider cost optimization strategies".to_string());
    }
    if email_issues > 0 {
        recommendations.push(format!(
            "Email notification issues detected in {} scenarios - verify SMTP configuration",
            email_issues
        ));
    }
    if recommendations.is_empty() {
        recommendations.push("All scenarios performed within acceptable parameters".to_string());
    }

    Some(BenchmarkSummary {
        average_latency_ms,
        total_tokens,
        total_cost,
        average_dataset_size,
        recommendations,
    })
}
