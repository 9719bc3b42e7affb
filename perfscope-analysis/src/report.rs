//! HTML summary report

use crate::aggregator::AnalysisReport;
use chrono::Utc;
use perfscope_core::{CoreError, TestRecord};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const STYLE: &str = "
    body { font-family: Arial, sans-serif; margin: 40px; }
    .summary { background: #f5f5f5; padding: 20px; border-radius: 8px; margin-bottom: 30px; }
    .metric { display: inline-block; margin: 10px 20px; }
    .metric-value { font-size: 24px; font-weight: bold; color: #2196F3; }
    .metric-label { font-size: 14px; color: #666; }
    table { width: 100%; border-collapse: collapse; margin-top: 20px; }
    th, td { padding: 12px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background-color: #f2f2f2; }
    .success { color: #4CAF50; }
    .failure { color: #f44336; }
";

/// Write `performance_report_<millis>.html` into `dir`, creating it if needed
pub fn write_html(
    dir: &Path,
    analysis: &AnalysisReport,
    records: &[TestRecord],
) -> Result<PathBuf, CoreError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!(
        "performance_report_{}.html",
        Utc::now().timestamp_millis()
    ));
    fs::write(&path, render(analysis, records))?;
    Ok(path)
}

pub fn render(analysis: &AnalysisReport, records: &[TestRecord]) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<title>Performance Test Report</title>\n");
    let _ = writeln!(html, "<style>{}</style>", STYLE);
    html.push_str("</head>\n<body>\n<h1>Performance Test Report</h1>\n");

    html.push_str("<div class=\"summary\">\n<h2>Summary</h2>\n");
    metric(&mut html, "Total Tests", &analysis.total_tests.to_string());
    metric(&mut html, "Successful Tests", &analysis.successful_tests.to_string());
    metric(&mut html, "Success Rate", &format!("{:.2}%", analysis.success_rate));

    if let Some(perf) = &analysis.performance {
        metric(&mut html, "Average Latency", &format!("{:.0}ms", perf.average_latency_ms));
        metric(&mut html, "Median Latency", &format!("{:.0}ms", perf.distribution.median_ms));
        metric(&mut html, "P95 Latency", &format!("{:.0}ms", perf.distribution.p95_ms));
        metric(&mut html, "Total Tokens", &perf.total_tokens.to_string());
        metric(&mut html, "Total Cost", &format!("${:.4}", perf.total_cost));
        metric(&mut html, "Average Dataset Size", &format!("{:.1}", perf.average_dataset_size));
    }

    if let Some(comparison) = &analysis.standards_comparison {
        metric(&mut html, "Latency Rating", &comparison.latency_rating.label);
    }
    html.push_str("</div>\n");

    if !analysis.recommendations.is_empty() {
        html.push_str("<h2>Recommendations</h2>\n<ul>\n");
        for recommendation in &analysis.recommendations {
            let _ = writeln!(html, "<li>{}</li>", escape(recommendation));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("<h2>Tests</h2>\n<table>\n");
    html.push_str(
        "<tr><th>Test</th><th>Status</th><th>Latency</th><th>Tokens</th><th>Cost</th><th>Dataset</th><th>Error</th></tr>\n",
    );
    let mut sorted: Vec<&TestRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.test_id.cmp(&b.test_id));
    for record in sorted {
        let (class, status) = if record.is_success() {
            ("success", "OK")
        } else {
            ("failure", "FAILED")
        };
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}ms</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&record.test_id),
            class,
            status,
            record.latency_ms,
            record.tokens_used().map(|t| t.to_string()).unwrap_or_default(),
            record.cost().map(|c| format!("${:.4}", c)).unwrap_or_default(),
            record.dataset_size().map(|d| d.to_string()).unwrap_or_default(),
            escape(record.error().unwrap_or_default()),
        );
    }
    html.push_str("</table>\n");

    let _ = writeln!(html, "<p>Generated on: {}</p>", Utc::now().to_rfc3339());
    html.push_str("</body>\n</html>\n");
    html
}

fn metric(html: &mut String, label: &str, value: &str) {
    let _ = writeln!(
        html,
        "<div class=\"metric\"><div class=\"metric-value\">{}</div><div class=\"metric-label\">{}</div></div>",
        escape(value),
        label
    );
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_analysis() -> AnalysisReport {
        AnalysisReport {
            total_tests: 1,
            successful_tests: 0,
            failed_tests: 1,
            success_rate: 0.0,
            performance: None,
            standards_comparison: None,
            recommendations: vec!["Check <target> & retry".to_string()],
            report_path: None,
            report_error: None,
        }
    }

    #[test]
    fn test_render_escapes_untrusted_text() {
        let records = vec![TestRecord::failure(
            "t<1>",
            "q",
            Utc::now(),
            10,
            "HTTP 500: <html>oops</html>",
        )];
        let html = render(&empty_analysis(), &records);

        assert!(html.contains("t&lt;1&gt;"));
        assert!(html.contains("HTTP 500: &lt;html&gt;oops&lt;/html&gt;"));
        assert!(html.contains("Check &lt;target&gt; &amp; retry"));
        assert!(html.contains("0.00%"));
        assert!(!html.contains("<html>oops"));
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("reports");
        let path = write_html(&nested, &empty_analysis(), &[]).unwrap();

        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("performance_report_"));
        assert!(name.ends_with(".html"));
    }
}
