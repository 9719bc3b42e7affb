//! Aggregation and reporting over stored probe results
//!
//! [`AnalysisAggregator`] summarises a selection of [`TestRecord`]s into an
//! [`AnalysisReport`], optionally rendering an HTML summary. [`CostMonitor`]
//! looks at the records of a recent time window and projects spend.
//!
//! [`TestRecord`]: perfscope_core::TestRecord

pub mod aggregator;
pub mod cost;
pub mod report;
pub mod stats;

pub use aggregator::{
    AnalysisAggregator, AnalysisOutcome, AnalysisReport, EmailAnalysis, PerformanceSummary,
    StandardsComparison, NO_DATA_MESSAGE,
};
pub use cost::{CostDistribution, CostEfficiency, CostMonitor, CostReport, Timeframe};
pub use stats::LatencyDistribution;
