//! Scenario benchmarks through the service

mod common;

use common::{mount_chat, rich_body, service_for, THIN_BODY};
use perfscope_service::BenchmarkRequest;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_benchmark_all_scenarios() {
    let server = MockServer::start().await;
    mount_chat(&server, 200, rich_body()).await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let report = service.benchmark(BenchmarkRequest::default()).await.unwrap();

    assert_eq!(report.total_scenarios, 7);
    assert_eq!(report.successful_scenarios, 7);
    assert_eq!(report.failed_scenarios, 0);
    assert_eq!(service.test_results().len(), 7);

    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.average_dataset_size, 12.0);
    assert_eq!(
        summary.recommendations,
        vec!["All scenarios performed within acceptable parameters".to_string()]
    );
}

#[tokio::test]
async fn test_benchmark_named_scenarios_in_request_order() {
    let server = MockServer::start().await;
    mount_chat(&server, 200, THIN_BODY).await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let report = service
        .benchmark(BenchmarkRequest {
            scenarios: vec![
                "sap".to_string(),
                "unknown".to_string(),
                "sage".to_string(),
                "sap".to_string(),
            ],
            target_url: None,
        })
        .await
        .unwrap();

    let names: Vec<&str> = report.results.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(names, vec!["sap", "sage"]);
    assert!(report
        .results
        .iter()
        .all(|r| r.record.test_id.ends_with(&r.scenario)));

    let summary = report.summary.as_ref().unwrap();
    assert!(summary
        .recommendations
        .iter()
        .any(|r| r.starts_with("Email notification issues detected in 2 scenarios")));
}

#[tokio::test]
async fn test_benchmark_all_failing_has_no_summary() {
    let server = MockServer::start().await;
    mount_chat(&server, 500, "down").await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let report = service
        .benchmark(BenchmarkRequest {
            scenarios: vec!["qad".to_string()],
            target_url: None,
        })
        .await
        .unwrap();

    assert_eq!(report.failed_scenarios, 1);
    assert!(report.summary.is_none());
}

#[tokio::test]
async fn test_available_scenarios() {
    let server = MockServer::start().await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let scenarios = service.available_scenarios();
    let keys: Vec<&str> = scenarios.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["company", "microsoft", "qad", "sage", "sap", "sectors", "services"]
    );
    assert!(scenarios
        .values()
        .all(|q| q.contains("perf-reports@example.com")));
}
