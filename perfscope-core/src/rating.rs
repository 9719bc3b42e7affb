//! Rating against fixed industry thresholds
//!
//! [`RatingEngine`] maps a single metric value to a [`Tier`] and grades a
//! whole [`MetricSet`] into a [`ComparisonReport`]. It is pure: the only
//! input besides the metrics is the [`IndustryStandards`] it was built with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Categorical rating, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Excellent,
    Good,
    Acceptable,
    Poor,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Excellent => "Excellent",
            Tier::Good => "Good",
            Tier::Acceptable => "Acceptable",
            Tier::Poor => "Poor",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metric families that can be rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Milliseconds, lower is better
    Latency,
    /// Tokens per second, higher is better
    Throughput,
    /// Dollars per probe, lower is better
    Cost,
    /// Dataset elements, higher is better
    DatasetSize,
    /// Fraction in `[0, 1]`, higher is better
    SuccessRate,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Latency => "latency",
            Metric::Throughput => "throughput",
            Metric::Cost => "cost",
            Metric::DatasetSize => "dataset_size",
            Metric::SuccessRate => "success_rate",
        }
    }

    fn display_value(&self, value: f64) -> String {
        match self {
            Metric::Latency => format!("{:.0}ms", value),
            Metric::Throughput => format!("{:.2} tokens/sec", value),
            Metric::Cost => format!("${:.4}", value),
            Metric::DatasetSize => format!("{:.0} elements", value),
            Metric::SuccessRate => format!("{:.1}%", value * 100.0),
        }
    }

    fn comparison_text(&self, tier: Tier) -> &'static str {
        match (self, tier) {
            (Metric::Latency, Tier::Excellent) => "Exceeds industry standards",
            (Metric::Latency, Tier::Good) => "Meets good industry standards",
            (Metric::Latency, Tier::Acceptable) => "Within acceptable range",
            (Metric::Latency, Tier::Poor) => "Below industry standards",
            (Metric::Throughput, Tier::Excellent) => "High processing efficiency",
            (Metric::Throughput, Tier::Good) => "Good processing efficiency",
            (Metric::Throughput, Tier::Acceptable) => "Adequate processing efficiency",
            (Metric::Throughput, Tier::Poor) => "Low processing efficiency",
            (Metric::Cost, Tier::Excellent) => "Very cost efficient",
            (Metric::Cost, Tier::Good) => "Cost efficient",
            (Metric::Cost, Tier::Acceptable) => "Reasonable cost",
            (Metric::Cost, Tier::Poor) => "High cost - optimization needed",
            (Metric::DatasetSize, Tier::Excellent) => "High-quality comprehensive dataset",
            (Metric::DatasetSize, Tier::Good) => "Good dataset size",
            (Metric::DatasetSize, Tier::Acceptable) => "Meets minimum requirements",
            (Metric::DatasetSize, Tier::Poor) => "Below minimum dataset standards",
            (Metric::SuccessRate, Tier::Excellent) => "Highly reliable execution",
            (Metric::SuccessRate, Tier::Good) => "Reliable execution",
            (Metric::SuccessRate, Tier::Acceptable) => "Acceptable reliability",
            (Metric::SuccessRate, Tier::Poor) => "Reliability below industry standards",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three ordered boundaries for one metric family
///
/// Boundaries are inclusive: with `higher_is_better == false` a value equal
/// to `excellent` is Excellent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub excellent: f64,
    pub good: f64,
    pub acceptable: f64,
    pub higher_is_better: bool,
}

impl TierBand {
    pub const fn lower_is_better(excellent: f64, good: f64, acceptable: f64) -> Self {
        Self {
            excellent,
            good,
            acceptable,
            higher_is_better: false,
        }
    }

    pub const fn higher_is_better(excellent: f64, good: f64, acceptable: f64) -> Self {
        Self {
            excellent,
            good,
            acceptable,
            higher_is_better: true,
        }
    }

    pub fn tier(&self, value: f64) -> Tier {
        let within = |bound: f64| {
            if self.higher_is_better {
                value >= bound
            } else {
                value <= bound
            }
        };

        if within(self.excellent) {
            Tier::Excellent
        } else if within(self.good) {
            Tier::Good
        } else if within(self.acceptable) {
            Tier::Acceptable
        } else {
            Tier::Poor
        }
    }
}

/// Rating thresholds per metric family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryStandards {
    pub latency_ms: TierBand,
    pub throughput: TierBand,
    pub cost: TierBand,
    pub dataset_size: TierBand,
    pub success_rate: TierBand,
}

impl Default for IndustryStandards {
    fn default() -> Self {
        Self {
            latency_ms: TierBand::lower_is_better(200.0, 500.0, 1000.0),
            throughput: TierBand::higher_is_better(50.0, 30.0, 15.0),
            cost: TierBand::lower_is_better(0.03, 0.06, 0.10),
            dataset_size: TierBand::higher_is_better(20.0, 10.0, 5.0),
            success_rate: TierBand::higher_is_better(0.98, 0.95, 0.90),
        }
    }
}

impl IndustryStandards {
    pub fn band(&self, metric: Metric) -> &TierBand {
        match metric {
            Metric::Latency => &self.latency_ms,
            Metric::Throughput => &self.throughput,
            Metric::Cost => &self.cost,
            Metric::DatasetSize => &self.dataset_size,
            Metric::SuccessRate => &self.success_rate,
        }
    }
}

/// Tier plus the label shown to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub tier: Tier,
    pub label: String,
}

/// Metrics to grade; absent metrics are skipped
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub latency_ms: Option<u64>,
    pub tokens_used: Option<u64>,
    pub cost: Option<f64>,
    pub dataset_size: Option<u64>,
    pub success_rate: Option<f64>,
    /// Whether the underlying execution succeeded
    pub success: Option<bool>,
}

impl MetricSet {
    /// Tokens per second, when both inputs exist and latency is positive
    pub fn throughput(&self) -> Option<f64> {
        match (self.tokens_used, self.latency_ms) {
            (Some(tokens), Some(latency)) if latency > 0 => {
                Some(tokens as f64 / (latency as f64 / 1000.0))
            }
            _ => None,
        }
    }
}

/// One rated metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: Metric,
    pub actual: f64,
    pub actual_display: String,
    pub rating: Rating,
    pub comparison: String,
}

/// Number of metrics per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub evaluated: usize,
    pub excellent: usize,
    pub good: usize,
    pub acceptable: usize,
    pub poor: usize,
}

impl TierCounts {
    fn record(&mut self, tier: Tier) {
        self.evaluated += 1;
        match tier {
            Tier::Excellent => self.excellent += 1,
            Tier::Good => self.good += 1,
            Tier::Acceptable => self.acceptable += 1,
            Tier::Poor => self.poor += 1,
        }
    }
}

/// Grade across all evaluated metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallGrade {
    Excellent,
    Good,
    Acceptable,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl OverallGrade {
    /// Excellent at 70% excellent, Good at 60% good-or-better, Acceptable at
    /// 80% acceptable-or-better. With nothing evaluated every share is met.
    ///
    /// Every rated metric counts, so derived throughput and a supplied
    /// success rate weigh on the grade alongside latency, cost and dataset
    /// size. A metric set carrying only those three grades on them alone.
    pub fn from_counts(counts: &TierCounts) -> Self {
        let total = counts.evaluated as f64;
        let excellent = counts.excellent as f64;
        let good = excellent + counts.good as f64;
        let acceptable = good + counts.acceptable as f64;

        if excellent >= total * 0.7 {
            OverallGrade::Excellent
        } else if good >= total * 0.6 {
            OverallGrade::Good
        } else if acceptable >= total * 0.8 {
            OverallGrade::Acceptable
        } else {
            OverallGrade::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverallGrade::Excellent => "Excellent",
            OverallGrade::Good => "Good",
            OverallGrade::Acceptable => "Acceptable",
            OverallGrade::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for OverallGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the thresholds come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryContext {
    pub benchmark_source: String,
    pub applicable_domains: Vec<String>,
    pub last_updated: String,
    pub methodology: String,
    pub benchmark_sources: BTreeMap<String, String>,
    pub note: String,
}

impl Default for IndustryContext {
    fn default() -> Self {
        let benchmark_sources = [
            ("latency", "Google PageSpeed Insights, Web Performance Standards"),
            ("throughput", "OpenAI, Hugging Face Leaderboards"),
            ("cost", "AI Model Pricing Analysis, Cost Optimization Studies"),
            ("dataset_size", "ML Dataset Standards, Data Science Best Practices"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            benchmark_source: "Industry best practices for AI/ML systems".to_string(),
            applicable_domains: [
                "Natural Language Processing",
                "API Performance",
                "Dataset Generation",
                "AI Model Inference",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            last_updated: "2025-01-27".to_string(),
            methodology: "Benchmarks derived from industry reports, academic research, and production system performance data".to_string(),
            benchmark_sources,
            note: "Standards are guidelines and may vary based on specific use cases and requirements".to_string(),
        }
    }
}

/// Result of grading a [`MetricSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub test_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub standards: IndustryStandards,
    pub comparisons: Vec<MetricComparison>,
    pub counts: TierCounts,
    pub overall_grade: OverallGrade,
    pub successful_execution: bool,
    pub recommendations: Vec<String>,
    pub industry_context: IndustryContext,
}

impl ComparisonReport {
    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn comparison(&self, metric: Metric) -> Option<&MetricComparison> {
        self.comparisons.iter().find(|c| c.metric == metric)
    }
}

/// Rates metrics against a fixed set of standards
#[derive(Debug, Clone, Default)]
pub struct RatingEngine {
    standards: IndustryStandards,
}

impl RatingEngine {
    pub fn new(standards: IndustryStandards) -> Self {
        Self { standards }
    }

    pub fn standards(&self) -> &IndustryStandards {
        &self.standards
    }

    pub fn rate(&self, metric: Metric, value: f64) -> Rating {
        let tier = self.standards.band(metric).tier(value);
        let label = match (metric, tier) {
            (Metric::Cost, Tier::Poor) => "Expensive".to_string(),
            _ => tier.to_string(),
        };
        Rating { tier, label }
    }

    fn compare_metric(&self, metric: Metric, value: f64) -> MetricComparison {
        let rating = self.rate(metric, value);
        MetricComparison {
            metric,
            actual: value,
            actual_display: metric.display_value(value),
            comparison: metric.comparison_text(rating.tier).to_string(),
            rating,
        }
    }

    /// Rate every metric present in `metrics` and grade the tally
    pub fn compare(&self, metrics: &MetricSet) -> ComparisonReport {
        let candidates = [
            (Metric::Latency, metrics.latency_ms.map(|v| v as f64)),
            (Metric::Throughput, metrics.throughput()),
            (Metric::Cost, metrics.cost),
            (Metric::DatasetSize, metrics.dataset_size.map(|v| v as f64)),
            (Metric::SuccessRate, metrics.success_rate),
        ];

        let comparisons: Vec<MetricComparison> = candidates
            .into_iter()
            .filter_map(|(metric, value)| value.map(|v| self.compare_metric(metric, v)))
            .collect();

        let mut counts = TierCounts::default();
        for comparison in &comparisons {
            counts.record(comparison.rating.tier);
        }

        ComparisonReport {
            test_id: None,
            timestamp: Utc::now(),
            standards: self.standards.clone(),
            overall_grade: OverallGrade::from_counts(&counts),
            counts,
            comparisons,
            successful_execution: metrics.success.unwrap_or(false),
            recommendations: self.recommendations(metrics),
            industry_context: IndustryContext::default(),
        }
    }

    fn recommendations(&self, metrics: &MetricSet) -> Vec<String> {
        let mut recommendations = Vec::new();
        let s = &self.standards;

        if metrics.latency_ms.is_some_and(|v| v as f64 > s.latency_ms.good) {
            recommendations.push(
                "Optimize response time - consider caching, query optimization, or infrastructure scaling"
                    .to_string(),
            );
        }

        if metrics.cost.is_some_and(|v| v > s.cost.acceptable) {
            recommendations.push(
                "High cost detected - review token usage, model selection, and query complexity"
                    .to_string(),
            );
        }

        if metrics.dataset_size.is_some_and(|v| (v as f64) < s.dataset_size.good) {
            recommendations.push(
                "Increase dataset size to meet recommended standards - improve content generation logic"
                    .to_string(),
            );
        }

        if metrics.success_rate.is_some_and(|v| v < s.success_rate.acceptable) {
            recommendations.push(
                "Success rate is below industry standards - investigate failing probes".to_string(),
            );
        }

        if metrics.success == Some(false) {
            recommendations.push(
                "Address execution failures - implement better error handling and retry mechanisms"
                    .to_string(),
            );
        }

        recommendations.push(
            "Monitor performance trends over time to identify patterns and optimization opportunities"
                .to_string(),
        );
        recommendations.push(
            "Consider implementing automated performance alerting for proactive monitoring"
                .to_string(),
        );

        recommendations
    }
}
