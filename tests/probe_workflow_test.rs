//! Single probe behaviour against a mocked chat endpoint

mod common;

use common::{mount_chat, rich_body, service_for, CHAT_PATH, THIN_BODY};
use perfscope_core::EMAIL_WARNING;
use perfscope_service::RunProbeRequest;
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_successful_probe_records_telemetry() {
    let server = MockServer::start().await;
    mount_chat(&server, 200, rich_body()).await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let record = service
        .run_probe(RunProbeRequest::new("Créez un dataset sur SAP").with_test_id("probe-1"))
        .await
        .unwrap();

    assert!(record.is_success(), "unexpected failure: {:?}", record.error());
    assert!(record.error().is_none());

    let telemetry = record.telemetry().unwrap();
    assert_eq!(telemetry.dataset_size, 12);
    assert_eq!(telemetry.mcp_calls, 4);
    assert!(telemetry.email_confirmed);
    assert!(telemetry.tokens_used > 0);
    assert!(telemetry.cost > 0.0);

    // Duplicate URLs collapse
    assert_eq!(record.urls.len(), 2);
    assert!(record.evaluation.contains("Dataset Size: Excellent (12 elements)"));
    assert!(record.evaluation.contains("Data Sources: Good (2 URLs fetched)"));
    assert!(!record.has_email_issue());

    let stored = service.test_results();
    assert_eq!(stored.get("probe-1"), Some(&record));
}

#[tokio::test]
async fn test_probe_sends_query_with_instruction_block() {
    let server = MockServer::start().await;
    mount_chat(&server, 200, rich_body()).await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    service
        .run_probe(RunProbeRequest::new("Describe the QAD offering"))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.path(), CHAT_PATH);

    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Describe the QAD offering"));
    assert!(message.contains("send-email"));
    assert!(message.contains("perf-reports@example.com"));
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn test_missing_email_confirmation_is_flagged() {
    let server = MockServer::start().await;
    mount_chat(&server, 200, THIN_BODY).await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let record = service.run_probe(RunProbeRequest::new("q")).await.unwrap();

    assert!(record.is_success());
    assert!(record.recommendations.starts_with(EMAIL_WARNING));
    assert!(record.has_email_issue());
    assert!(record.evaluation.contains("Data Sources: Poor (no URLs detected)"));
}

#[tokio::test]
async fn test_remote_error_becomes_failed_record() {
    let server = MockServer::start().await;
    mount_chat(&server, 503, "upstream overloaded").await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    let record = service
        .run_probe(RunProbeRequest::new("q").with_test_id("probe-503"))
        .await
        .unwrap();

    assert!(!record.is_success());
    assert!(record.telemetry().is_none());
    assert_eq!(record.error(), Some("HTTP 503: upstream overloaded"));
    assert!(service.test_results().contains_key("probe-503"));
}

#[tokio::test]
async fn test_unreachable_target_becomes_failed_record() {
    let server = MockServer::start().await;
    let reports = TempDir::new().unwrap();
    let service = service_for(&server, reports.path());

    // Nothing listens on port 9 locally
    let record = service
        .run_probe(RunProbeRequest::new("q").with_target_url("http://127.0.0.1:9"))
        .await
        .unwrap();

    assert!(!record.is_success());
    assert!(!record.error().unwrap_or_default().is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}
