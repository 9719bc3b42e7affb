//! HTTP client implementation

use crate::config::HttpConfig;
use crate::errors::HttpError;
use crate::types::{ChatRequest, ChatResponse};
use reqwest::{Client, Url};
use tracing::{debug, info};

/// Client side of the chat endpoint contract
///
/// Implementations send exactly one POST per call. Any status code is a
/// response; only transport-level failures are errors.
#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_chat(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, HttpError>;
}

/// reqwest-backed chat client
#[derive(Debug, Clone)]
pub struct HttpManager {
    config: HttpConfig,
    client: Client,
}

impl HttpManager {
    /// Create a new HttpManager with default configuration
    pub fn new() -> Result<Self, HttpError> {
        Self::with_config(HttpConfig::default())
    }

    /// Create a new HttpManager with specific configuration
    ///
    /// The underlying connection pool is built once and shared by every
    /// clone of the manager.
    pub fn with_config(config: HttpConfig) -> Result<Self, HttpError> {
        debug!(
            "Creating HttpManager with timeout: {}s, connect timeout: {}s",
            config.timeout.as_secs(),
            config.connect_timeout.as_secs()
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| HttpError::ConfigError(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl ChatClient for HttpManager {
    async fn send_chat(
        &self,
        endpoint: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, HttpError> {
        let url = Url::parse(endpoint)
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        info!("Sending chat request to: {}", url);
        debug!("Request message: {} bytes", request.message.len());

        let response = self.client.post(url).json(request).send().await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        info!("Chat response received: {} ({} bytes)", status, body.len());

        Ok(ChatResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> ChatRequest {
        ChatRequest::new("Find companies using SAP", "2025-01-27T10:00:00Z")
    }

    #[tokio::test]
    async fn test_posts_json_body_and_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/discovery-ai/chat"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "message": "Find companies using SAP",
                "timestamp": "2025-01-27T10:00:00Z"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"Input\": \"x\"}"))
            .expect(1)
            .mount(&server)
            .await;

        let manager = HttpManager::new().unwrap();
        let endpoint = format!("{}/discovery-ai/chat", server.uri());
        let response = manager.send_chat(&endpoint, &request()).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.body, "{\"Input\": \"x\"}");
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let manager = HttpManager::new().unwrap();
        let endpoint = format!("{}/discovery-ai/chat", server.uri());
        let response = manager.send_chat(&endpoint, &request()).await.unwrap();

        assert!(!response.is_success());
        assert_eq!(response.status, 503);
        assert_eq!(response.body, "overloaded");
    }

    #[tokio::test]
    async fn test_timeout_is_a_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let config = HttpConfig {
            timeout: Duration::from_millis(200),
            connect_timeout: Duration::from_millis(200),
            ..HttpConfig::default()
        };
        let manager = HttpManager::with_config(config).unwrap();
        let endpoint = format!("{}/discovery-ai/chat", server.uri());
        let result = manager.send_chat(&endpoint, &request()).await;

        assert!(matches!(result, Err(HttpError::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let manager = HttpManager::new().unwrap();
        let result = manager.send_chat("not a url", &request()).await;
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }
}
