//! Core domain models and types for perfscope
//!
//! This crate contains the probe records, the shared result store, the
//! response telemetry extractor and the rating engine. It performs no I/O
//! and defines the domain language the execution and analysis crates use.

pub mod error;
pub mod ids;
pub mod narrative;
pub mod rating;
pub mod record;
pub mod scenarios;
pub mod store;
pub mod telemetry;

// Re-export commonly used types at the crate root
pub use error::{CoreError, Result};
pub use narrative::{Narrative, NarrativeThresholds};
pub use rating::{
    ComparisonReport, IndustryContext, IndustryStandards, Metric, MetricComparison, MetricSet,
    OverallGrade, Rating, RatingEngine, Tier, TierCounts, TierBand,
};
pub use record::{LoadTestRecord, ProbeOutcome, Telemetry, TestRecord};
pub use store::ResultStore;
pub use telemetry::{
    ExtractionConfig, PatternExtractor, PricingModel, TelemetryExtractor, TelemetrySignals,
    EMAIL_WARNING,
};
