//! Cost monitoring over a recent window

use chrono::{DateTime, Duration, Utc};
use perfscope_core::{CoreError, PricingModel, ResultStore, TestRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

pub const NO_RECENT_DATA: &str = "No recent test data available for cost analysis";

/// Look-back window for cost monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Hour,
    Day,
    Week,
}

impl Timeframe {
    pub fn window(&self) -> Duration {
        match self {
            Timeframe::Hour => Duration::hours(1),
            Timeframe::Day => Duration::hours(24),
            Timeframe::Week => Duration::hours(24 * 7),
        }
    }

    fn hours(&self) -> f64 {
        self.window().num_hours() as f64
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Hour => "hour",
            Timeframe::Day => "day",
            Timeframe::Week => "week",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hour" => Ok(Timeframe::Hour),
            "day" => Ok(Timeframe::Day),
            "week" => Ok(Timeframe::Week),
            other => Err(CoreError::Validation(format!(
                "unknown timeframe '{}', expected hour, day or week",
                other
            ))),
        }
    }
}

/// Probes bucketed by cost: low below $0.05, medium up to $0.10, high above
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEfficiency {
    /// Mean of cost / dataset size over probes with a non-empty dataset
    pub average_cost_per_dataset_element: Option<f64>,
    pub average_tokens_per_second: f64,
    pub distribution: CostDistribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub timeframe: Timeframe,
    pub model_name: String,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub total_tests: usize,
    pub total_tokens: u64,
    pub total_cost: f64,
    pub average_cost_per_test: f64,
    pub average_tokens_per_test: f64,
    pub projected_monthly_tests: f64,
    pub projected_monthly_cost: f64,
    pub projected_monthly_tokens: f64,
    /// Absent when the window is empty
    pub efficiency: Option<CostEfficiency>,
    pub recommendations: Vec<String>,
}

pub struct CostMonitor {
    store: Arc<ResultStore>,
    default_model: String,
}

impl CostMonitor {
    pub fn new(store: Arc<ResultStore>) -> Self {
        Self::with_pricing(store, &PricingModel::default())
    }

    pub fn with_pricing(store: Arc<ResultStore>, pricing: &PricingModel) -> Self {
        Self {
            store,
            default_model: pricing.model_name.clone(),
        }
    }

    pub fn monitor(&self, timeframe: Timeframe, model_name: Option<&str>) -> CostReport {
        self.monitor_at(timeframe, model_name, Utc::now())
    }

    /// Cost report for the window ending at `now`
    pub fn monitor_at(
        &self,
        timeframe: Timeframe,
        model_name: Option<&str>,
        now: DateTime<Utc>,
    ) -> CostReport {
        let period_start = now - timeframe.window();
        let recent: Vec<TestRecord> = self
            .store
            .tests()
            .into_values()
            .filter(|r| r.timestamp > period_start)
            .collect();

        debug!(
            "Cost monitoring over the last {}: {} records",
            timeframe,
            recent.len()
        );

        let model_name = model_name.unwrap_or(&self.default_model).to_string();
        let total_tests = recent.len();
        let total_tokens: u64 = recent.iter().filter_map(|r| r.tokens_used()).sum();
        let total_cost: f64 = recent.iter().filter_map(|r| r.cost()).sum();

        if recent.is_empty() {
            return CostReport {
                timeframe,
                model_name,
                period_start,
                period_end: now,
                total_tests,
                total_tokens,
                total_cost,
                average_cost_per_test: 0.0,
                average_tokens_per_test: 0.0,
                projected_monthly_tests: 0.0,
                projected_monthly_cost: 0.0,
                projected_monthly_tokens: 0.0,
                efficiency: None,
                recommendations: vec![NO_RECENT_DATA.to_string()],
            };
        }

        let n = total_tests as f64;
        let average_cost_per_test = total_cost / n;
        let average_tokens_per_test = total_tokens as f64 / n;

        let tests_per_hour = n / timeframe.hours();
        let projected_monthly_tests = tests_per_hour * 24.0 * 30.0;
        let projected_monthly_cost = projected_monthly_tests * average_cost_per_test;
        let projected_monthly_tokens = projected_monthly_tests * average_tokens_per_test;

        CostReport {
            timeframe,
            model_name,
            period_start,
            period_end: now,
            total_tests,
            total_tokens,
            total_cost,
            average_cost_per_test,
            average_tokens_per_test,
            projected_monthly_tests,
            projected_monthly_cost,
            projected_monthly_tokens,
            efficiency: Some(efficiency(&recent)),
            recommendations: cost_recommendations(
                total_cost,
                projected_monthly_cost,
                average_cost_per_test,
            ),
        }
    }
}

fn efficiency(records: &[TestRecord]) -> CostEfficiency {
    let per_element: Vec<f64> = records
        .iter()
        .filter_map(|r| match r.dataset_size() {
            Some(size) if size > 0 => Some(r.cost().unwrap_or(0.0) / size as f64),
            _ => None,
        })
        .collect();

    let throughput: Vec<f64> = records
        .iter()
        .filter(|r| r.latency_ms > 0)
        .filter_map(|r| {
            r.tokens_used()
                .map(|t| t as f64 / (r.latency_ms as f64 / 1000.0))
        })
        .collect();

    let mut distribution = CostDistribution::default();
    for record in records {
        let cost = record.cost().unwrap_or(0.0);
        if cost < 0.05 {
            distribution.low += 1;
        } else if cost <= 0.10 {
            distribution.medium += 1;
        } else {
            distribution.high += 1;
        }
    }

    CostEfficiency {
        average_cost_per_dataset_element: if per_element.is_empty() {
            None
        } else {
            Some(crate::stats::mean(&per_element))
        },
        average_tokens_per_second: crate::stats::mean(&throughput),
        distribution,
    }
}

fn cost_recommendations(
    total_cost: f64,
    projected_monthly_cost: f64,
    average_cost_per_test: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if total_cost > 5.0 {
        recommendations
            .push("High total cost detected - consider implementing cost controls".to_string());
    }

    if projected_monthly_cost > 100.0 {
        recommendations
            .push("Projected monthly cost exceeds $100 - implement budget monitoring".to_string());
    } else if projected_monthly_cost > 50.0 {
        recommendations
            .push("Projected monthly cost approaching $50 - monitor usage patterns".to_string());
    }

    if average_cost_per_test > 0.15 {
        recommendations.push(
            "High average cost per test - optimize query complexity or reduce token usage"
                .to_string(),
        );
    }

    recommendations.push("Consider using more cost-effective models for routine testing".to_string());
    recommendations.push("Implement caching for repeated queries to reduce API calls".to_string());
    recommendations.push("Set up automated cost alerts for budget management".to_string());

    if total_cost < 1.0 && projected_monthly_cost < 20.0 {
        recommendations.push(
            "Cost levels are within acceptable range - maintain current usage patterns".to_string(),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfscope_core::{narrative, TelemetrySignals};
    use std::collections::BTreeSet;

    fn success_at(id: &str, at: DateTime<Utc>, latency: u64, tokens: u64, cost: f64, dataset: u64) -> TestRecord {
        let signals = TelemetrySignals {
            dataset_size: dataset,
            mcp_calls: 1,
            urls: BTreeSet::new(),
            email_confirmed: true,
            tokens_used: tokens,
            cost,
            warnings: Vec::new(),
        };
        let narrative = narrative::evaluate(latency, &signals);
        TestRecord::success(id, "q", at, latency, signals, &narrative)
    }

    #[test]
    fn test_timeframe_parsing() {
        assert_eq!("HOUR".parse::<Timeframe>().unwrap(), Timeframe::Hour);
        assert_eq!(" day ".parse::<Timeframe>().unwrap(), Timeframe::Day);
        assert_eq!("Week".parse::<Timeframe>().unwrap(), Timeframe::Week);
        assert!(matches!(
            "month".parse::<Timeframe>(),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_window() {
        let monitor = CostMonitor::new(Arc::new(ResultStore::new()));
        let report = monitor.monitor(Timeframe::Day, None);

        assert_eq!(report.total_tests, 0);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.projected_monthly_cost, 0.0);
        assert!(report.efficiency.is_none());
        assert_eq!(report.recommendations, vec![NO_RECENT_DATA.to_string()]);
        assert_eq!(report.model_name, "llama-3.1-8b-instant");
    }

    #[test]
    fn test_window_selection_and_projection() {
        let now = Utc::now();
        let store = Arc::new(ResultStore::new());
        store.insert_test(success_at("recent1", now - Duration::minutes(10), 1000, 100, 0.02, 4));
        store.insert_test(success_at("recent2", now - Duration::minutes(30), 2000, 300, 0.08, 0));
        store.insert_test(TestRecord::failure("recent3", "q", now - Duration::minutes(5), 50, "refused"));
        store.insert_test(success_at("old", now - Duration::hours(3), 1000, 999, 9.0, 1));

        let monitor = CostMonitor::new(store);
        let report = monitor.monitor_at(Timeframe::Hour, Some("custom-model"), now);

        assert_eq!(report.model_name, "custom-model");
        assert_eq!(report.total_tests, 3);
        assert_eq!(report.total_tokens, 400);
        assert!((report.total_cost - 0.10).abs() < 1e-12);
        assert!((report.average_cost_per_test - 0.10 / 3.0).abs() < 1e-12);

        // 3 tests in one hour projects to 3 * 24 * 30 tests a month
        assert_eq!(report.projected_monthly_tests, 2160.0);
        assert!((report.projected_monthly_cost - 72.0).abs() < 1e-9);

        let efficiency = report.efficiency.unwrap();
        assert_eq!(efficiency.average_cost_per_dataset_element, Some(0.005));
        assert_eq!(efficiency.average_tokens_per_second, 125.0);
        assert_eq!(
            efficiency.distribution,
            CostDistribution {
                low: 2,
                medium: 1,
                high: 0
            }
        );

        assert!(report
            .recommendations
            .contains(&"Projected monthly cost approaching $50 - monitor usage patterns".to_string()));
        assert!(!report
            .recommendations
            .iter()
            .any(|r| r.starts_with("Cost levels are within acceptable range")));
    }

    #[test]
    fn test_low_spend_is_within_range() {
        let now = Utc::now();
        let store = Arc::new(ResultStore::new());
        store.insert_test(success_at("a", now - Duration::hours(2), 500, 10, 0.001, 5));

        let report = CostMonitor::new(store).monitor_at(Timeframe::Week, None, now);
        assert_eq!(report.total_tests, 1);
        assert_eq!(report.recommendations.len(), 4);
        assert_eq!(
            report.recommendations[3],
            "Cost levels are within acceptable range - maintain current usage patterns"
        );
    }
}
