//! Result aggregation

use crate::report;
use crate::stats::{mean, LatencyDistribution};
use perfscope_config::AnalysisConfig;
use perfscope_core::{
    IndustryStandards, Metric, Rating, RatingEngine, ResultStore, TestRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const NO_DATA_MESSAGE: &str = "No test results found to analyze.";

/// Email confirmation across successful probes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailAnalysis {
    pub tests_with_email_issues: usize,
    /// Percentage of successful probes without an email issue
    pub email_success_rate: f64,
}

/// Metrics over the successful subset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    pub average_latency_ms: f64,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub average_dataset_size: f64,
    pub average_mcp_calls: f64,
    pub unique_urls: BTreeSet<String>,
    pub distribution: LatencyDistribution,
    pub email: EmailAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardsComparison {
    pub latency_rating: Rating,
    pub standards: IndustryStandards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_tests: usize,
    pub successful_tests: usize,
    pub failed_tests: usize,
    /// Percentage in `[0, 100]`
    pub success_rate: f64,
    /// Absent when nothing succeeded
    pub performance: Option<PerformanceSummary>,
    pub standards_comparison: Option<StandardsComparison>,
    pub recommendations: Vec<String>,
    pub report_path: Option<PathBuf>,
    pub report_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoData { message: String },
    Report(Box<AnalysisReport>),
}

impl AnalysisOutcome {
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisOutcome::Report(report) => Some(report),
            AnalysisOutcome::NoData { .. } => None,
        }
    }
}

/// Summarises stored probe records
pub struct AnalysisAggregator {
    store: Arc<ResultStore>,
    engine: RatingEngine,
    report_dir: PathBuf,
}

impl AnalysisAggregator {
    pub fn new(store: Arc<ResultStore>) -> Self {
        Self::with_config(store, &AnalysisConfig::default())
    }

    pub fn with_config(store: Arc<ResultStore>, config: &AnalysisConfig) -> Self {
        Self {
            store,
            engine: RatingEngine::default(),
            report_dir: config.report_dir.clone(),
        }
    }

    pub fn with_engine(mut self, engine: RatingEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Analyse the records named by `ids`, or every record when `ids` is
    /// `None` or empty. Unknown ids are ignored.
    pub fn analyze(
        &self,
        ids: Option<&[String]>,
        generate_report: bool,
        compare_with_standards: bool,
    ) -> AnalysisOutcome {
        let records: Vec<TestRecord> = match ids {
            Some(ids) if !ids.is_empty() => self.store.select_tests(ids),
            _ => self.store.tests().into_values().collect(),
        };

        if records.is_empty() {
            debug!("No records matched the analysis selection");
            return AnalysisOutcome::NoData {
                message: NO_DATA_MESSAGE.to_string(),
            };
        }

        let mut analysis = self.summarize(&records, compare_with_standards);

        if generate_report {
            match report::write_html(&self.report_dir, &analysis, &records) {
                Ok(path) => {
                    info!("Wrote performance report to {}", path.display());
                    analysis.report_path = Some(path);
                }
                Err(e) => {
                    warn!("Failed to write performance report: {}", e);
                    analysis.report_error = Some(format!("Failed to generate report: {}", e));
                }
            }
        }

        AnalysisOutcome::Report(Box::new(analysis))
    }

    fn summarize(&self, records: &[TestRecord], compare_with_standards: bool) -> AnalysisReport {
        let successes: Vec<&TestRecord> = records.iter().filter(|r| r.is_success()).collect();
        let total = records.len();

        let performance = performance_summary(&successes);

        let standards_comparison = match (&performance, compare_with_standards) {
            (Some(perf), true) => Some(StandardsComparison {
                latency_rating: self.engine.rate(Metric::Latency, perf.average_latency_ms),
                standards: self.engine.standards().clone(),
            }),
            _ => None,
        };

        let recommendations = performance
            .as_ref()
            .map(analysis_recommendations)
            .unwrap_or_default();

        AnalysisReport {
            total_tests: total,
            successful_tests: successes.len(),
            failed_tests: total - successes.len(),
            success_rate: successes.len() as f64 / total as f64 * 100.0,
            performance,
            standards_comparison,
            recommendations,
            report_path: None,
            report_error: None,
        }
    }
}

fn performance_summary(successes: &[&TestRecord]) -> Option<PerformanceSummary> {
    let latencies: Vec<u64> = successes.iter().map(|r| r.latency_ms).collect();
    let distribution = LatencyDistribution::from_latencies(&latencies)?;

    let as_f64 = |f: fn(&TestRecord) -> Option<u64>| -> Vec<f64> {
        successes.iter().map(|r| f(r).unwrap_or(0) as f64).collect()
    };

    let tests_with_email_issues = successes.iter().filter(|r| r.has_email_issue()).count();
    let email_success_rate =
        (successes.len() - tests_with_email_issues) as f64 / successes.len() as f64 * 100.0;

    Some(PerformanceSummary {
        average_latency_ms: mean(&latencies.iter().map(|&l| l as f64).collect::<Vec<_>>()),
        total_tokens: successes.iter().filter_map(|r| r.tokens_used()).sum(),
        total_cost: successes.iter().filter_map(|r| r.cost()).sum(),
        average_dataset_size: mean(&as_f64(TestRecord::dataset_size)),
        average_mcp_calls: mean(&as_f64(TestRecord::mcp_calls)),
        unique_urls: successes.iter().flat_map(|r| r.urls.iter().cloned()).collect(),
        distribution,
        email: EmailAnalysis {
            tests_with_email_issues,
            email_success_rate,
        },
    })
}

fn analysis_recommendations(perf: &PerformanceSummary) -> Vec<String> {
    let mut recommendations = Vec::new();

    if perf.average_latency_ms > 3000.0 {
        recommendations.push(
            "Optimize response time - consider caching, query optimization, or infrastructure scaling"
                .to_string(),
        );
    }
    if perf.average_dataset_size < 5.0 {
        recommendations.push(
            "Increase dataset size to meet recommended standards - improve content generation logic"
                .to_string(),
        );
    }
    if perf.total_cost > 5.0 {
        recommendations
            .push("High total cost detected - consider implementing cost controls".to_string());
    }
    if perf.email.tests_with_email_issues > 0 {
        recommendations.push(
            "Email notification issues detected - verify SMTP configuration and email sending logic"
                .to_string(),
        );
    }

    recommendations
}
