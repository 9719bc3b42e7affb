//! Shared fixtures for the perfscope integration tests

#![allow(dead_code)]

use perfscope_config::PerfscopeConfig;
use perfscope_service::PerformanceService;
use std::path::Path;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CHAT_PATH: &str = "/discovery-ai/chat";

/// A rich answer: 12 dataset elements, 4 tool calls, 2 distinct URLs, email confirmed
pub fn rich_body() -> String {
    let elements: Vec<String> = (0..12)
        .map(|i| format!(r#"{{"Input": "question {}", "Output": "answer"}}"#, i))
        .collect();
    format!(
        "[{}] get_markdown get_raw_text get_rendered_html send-email \
         https://www.discoveryintech.com/sap https://www.discoveryintech.com/sap \
         https://www.discoveryintech.com/sage. The email was sent to the team.",
        elements.join(", ")
    )
}

/// A thin answer with no email confirmation
pub const THIN_BODY: &str = r#"[{"Input": "only one"}]"#;

pub async fn mount_chat(server: &MockServer, status: u16, body: impl Into<String>) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string(body.into()))
        .mount(server)
        .await;
}

pub async fn mount_slow_chat(server: &MockServer, delay: Duration) {
    Mock::given(method("POST"))
        .and(path(CHAT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(rich_body())
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer, report_dir: &Path) -> PerfscopeConfig {
    let mut config = PerfscopeConfig::default();
    config.probe.target_url = server.uri();
    config.analysis.report_dir = report_dir.to_path_buf();
    config.http.timeout = Duration::from_secs(5);
    config.http.connect_timeout = Duration::from_secs(2);
    config
}

pub fn service_for(server: &MockServer, report_dir: &Path) -> PerformanceService {
    PerformanceService::new(config_for(server, report_dir)).expect("service should build")
}
