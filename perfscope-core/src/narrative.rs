//! Per-probe evaluation text
//!
//! Produces the human-readable evaluation and recommendation lines stored
//! on every successful [`TestRecord`](crate::TestRecord). These tiers are
//! deliberately looser than the [`IndustryStandards`](crate::IndustryStandards)
//! used for comparisons.

use crate::telemetry::TelemetrySignals;
use serde::{Deserialize, Serialize};

/// Tier boundaries for the per-probe narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeThresholds {
    /// Excellent / Good / Acceptable upper bounds in milliseconds
    pub latency_ms: [u64; 3],
    /// Excellent / Good / Acceptable lower bounds in elements
    pub dataset_size: [u64; 3],
    /// Good / Basic lower bounds in tool calls
    pub tool_calls: [u64; 2],
    /// Excellent / Good / Acceptable upper bounds in dollars
    pub cost: [f64; 3],
}

impl Default for NarrativeThresholds {
    fn default() -> Self {
        Self {
            latency_ms: [1000, 3000, 5000],
            dataset_size: [10, 5, 3],
            tool_calls: [3, 1],
            cost: [0.05, 0.10, 0.20],
        }
    }
}

/// Evaluation and recommendation lines for one probe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Narrative {
    pub evaluation: Vec<String>,
    pub recommendations: Vec<String>,
}

impl Narrative {
    pub fn evaluation_text(&self) -> String {
        join_lines(&self.evaluation)
    }

    pub fn recommendations_text(&self) -> String {
        join_lines(&self.recommendations)
    }
}

fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Evaluate with the default thresholds
pub fn evaluate(latency_ms: u64, signals: &TelemetrySignals) -> Narrative {
    evaluate_with(&NarrativeThresholds::default(), latency_ms, signals)
}

/// Build the narrative: one line per dimension in a fixed order, with the
/// extractor's warnings leading the recommendations.
pub fn evaluate_with(
    thresholds: &NarrativeThresholds,
    latency_ms: u64,
    signals: &TelemetrySignals,
) -> Narrative {
    let mut evaluation = Vec::with_capacity(5);
    let mut recommendations = signals.warnings.clone();

    let [lat_excellent, lat_good, lat_acceptable] = thresholds.latency_ms;
    if latency_ms <= lat_excellent {
        evaluation.push(format!("Response Time: Excellent ({}ms)", latency_ms));
    } else if latency_ms <= lat_good {
        evaluation.push(format!("Response Time: Good ({}ms)", latency_ms));
    } else if latency_ms <= lat_acceptable {
        evaluation.push(format!("Response Time: Acceptable ({}ms)", latency_ms));
        recommendations
            .push("- Consider optimizing query processing for better response times".to_string());
    } else {
        evaluation.push(format!("Response Time: Poor ({}ms)", latency_ms));
        recommendations
            .push("- Response time is too high. Review system performance and optimize".to_string());
    }

    let size = signals.dataset_size;
    let [ds_excellent, ds_good, ds_acceptable] = thresholds.dataset_size;
    if size >= ds_excellent {
        evaluation.push(format!("Dataset Size: Excellent ({} elements)", size));
    } else if size >= ds_good {
        evaluation.push(format!("Dataset Size: Good ({} elements)", size));
    } else if size >= ds_acceptable {
        evaluation.push(format!("Dataset Size: Acceptable ({} elements)", size));
        recommendations.push(format!(
            "- Increase dataset size to at least {} elements for better quality",
            ds_good
        ));
    } else {
        evaluation.push(format!("Dataset Size: Poor ({} elements)", size));
        recommendations.push(format!(
            "- Dataset size is below minimum requirements. Ensure at least {} elements",
            ds_good
        ));
    }

    let calls = signals.mcp_calls;
    let [tools_good, tools_basic] = thresholds.tool_calls;
    if calls >= tools_good {
        evaluation.push(format!("Tool Usage: Good ({} calls)", calls));
    } else if calls >= tools_basic {
        evaluation.push(format!("Tool Usage: Basic ({} calls)", calls));
        recommendations.push("- Increase tool usage for better data extraction".to_string());
    } else {
        evaluation.push(format!("Tool Usage: Poor ({} calls)", calls));
        recommendations.push(
            "- Insufficient tool usage. Ensure proper tool utilization for data fetching"
                .to_string(),
        );
    }

    let cost = signals.cost;
    let [cost_excellent, cost_good, cost_acceptable] = thresholds.cost;
    if cost <= cost_excellent {
        evaluation.push(format!("Cost Efficiency: Excellent (${:.4})", cost));
    } else if cost <= cost_good {
        evaluation.push(format!("Cost Efficiency: Good (${:.4})", cost));
    } else if cost <= cost_acceptable {
        evaluation.push(format!("Cost Efficiency: Acceptable (${:.4})", cost));
        recommendations.push("- Monitor costs - consider optimizing token usage".to_string());
    } else {
        evaluation.push(format!("Cost Efficiency: High (${:.4})", cost));
        recommendations
            .push("- High cost detected - review and optimize query complexity".to_string());
    }

    if signals.urls.is_empty() {
        evaluation.push("Data Sources: Poor (no URLs detected)".to_string());
        recommendations.push("- Ensure proper web data fetching using tools".to_string());
    } else {
        evaluation.push(format!(
            "Data Sources: Good ({} URLs fetched)",
            signals.urls.len()
        ));
    }

    Narrative {
        evaluation,
        recommendations,
    }
}
