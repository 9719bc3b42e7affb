//! Single probe execution

use chrono::Utc;
use perfscope_config::ProbeConfig;
use perfscope_core::narrative::{self, NarrativeThresholds};
use perfscope_core::{ResultStore, TelemetryExtractor, TestRecord};
use perfscope_http::{ChatClient, ChatRequest};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const DEFAULT_CHAT_PATH: &str = "/discovery-ai/chat";
const DEFAULT_RECIPIENT: &str = "perf-reports@example.com";

/// Sends one query to the target and records the outcome
///
/// Every call produces exactly one [`TestRecord`], stored before it is
/// returned. Transport failures and non-2xx statuses become failed records.
pub struct ProbeExecutor {
    client: Arc<dyn ChatClient>,
    store: Arc<ResultStore>,
    extractor: Arc<dyn TelemetryExtractor>,
    chat_path: String,
    recipient: String,
    thresholds: NarrativeThresholds,
}

impl ProbeExecutor {
    pub fn new(
        client: Arc<dyn ChatClient>,
        store: Arc<ResultStore>,
        extractor: Arc<dyn TelemetryExtractor>,
    ) -> Self {
        Self {
            client,
            store,
            extractor,
            chat_path: DEFAULT_CHAT_PATH.to_string(),
            recipient: DEFAULT_RECIPIENT.to_string(),
            thresholds: NarrativeThresholds::default(),
        }
    }

    /// Apply the endpoint path and notification recipient from configuration
    pub fn with_probe_config(self, config: &ProbeConfig) -> Self {
        self.with_chat_path(config.chat_path.clone())
            .with_recipient(config.notification_recipient.clone())
    }

    pub fn with_chat_path(mut self, chat_path: impl Into<String>) -> Self {
        self.chat_path = chat_path.into();
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    pub fn with_thresholds(mut self, thresholds: NarrativeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn store(&self) -> &Arc<ResultStore> {
        &self.store
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn endpoint(&self, target_base_url: &str) -> String {
        format!("{}{}", target_base_url.trim_end_matches('/'), self.chat_path)
    }

    /// Instruction appended to every query asking the target to confirm by email
    pub fn instruction_block(&self) -> String {
        format!(
            "\n\nIMPERATIVE: After creating the dataset, you MUST send an email notification using the send-email tool with these exact parameters:\
             \n- to: {}\
             \n- subject: Dataset for [topic] created successfully\
             \n- body: Dataset has been generated with [number] elements on [topic]. Generation completed at [current timestamp].",
            self.recipient
        )
    }

    pub async fn run(&self, query: &str, target_base_url: &str, test_id: &str) -> TestRecord {
        let endpoint = self.endpoint(target_base_url);
        let request = ChatRequest::new(
            format!("{}{}", query, self.instruction_block()),
            Utc::now().to_rfc3339(),
        );

        info!("Starting probe {} against {}", test_id, endpoint);
        let timestamp = Utc::now();
        let started = Instant::now();
        let result = self.client.send_chat(&endpoint, &request).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let record = match result {
            Ok(response) if response.is_success() => {
                debug!(
                    "Probe {} succeeded with status {} in {}ms",
                    test_id, response.status, latency_ms
                );
                let signals = self.extractor.extract(&response.body);
                let narrative = narrative::evaluate_with(&self.thresholds, latency_ms, &signals);
                TestRecord::success(test_id, query, timestamp, latency_ms, signals, &narrative)
            }
            Ok(response) => {
                warn!(
                    "Probe {} returned HTTP {} after {}ms",
                    test_id, response.status, latency_ms
                );
                TestRecord::failure(
                    test_id,
                    query,
                    timestamp,
                    latency_ms,
                    format!("HTTP {}: {}", response.status, response.body),
                )
            }
            Err(e) => {
                warn!("Probe {} failed after {}ms: {}", test_id, latency_ms, e);
                TestRecord::failure(test_id, query, timestamp, latency_ms, e.to_string())
            }
        };

        self.store.insert_test(record.clone());
        info!(
            test_id = %record.test_id,
            success = record.is_success(),
            latency_ms = record.latency_ms,
            "Probe finished"
        );
        record
    }
}
