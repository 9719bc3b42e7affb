//! Probe target configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// Where probes are sent and what they ask for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Base URL of the system under test
    #[serde(default = "default_target_url")]
    pub target_url: String,

    /// Path of the chat endpoint, appended to the base URL
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Recipient named in the email-notification instruction block
    #[serde(default = "default_notification_recipient")]
    pub notification_recipient: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            chat_path: default_chat_path(),
            notification_recipient: default_notification_recipient(),
        }
    }
}

impl Validatable for ProbeConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_url(&self.target_url, "target_url", self.domain_name())?;
        validate_required_string(&self.chat_path, "chat_path", self.domain_name())?;

        if !self.chat_path.starts_with('/') {
            return Err(self.validation_error("chat_path must start with '/'"));
        }

        validate_required_string(
            &self.notification_recipient,
            "notification_recipient",
            self.domain_name(),
        )?;

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "probe"
    }
}

fn default_target_url() -> String {
    "http://localhost:8072".to_string()
}

fn default_chat_path() -> String {
    "/discovery-ai/chat".to_string()
}

fn default_notification_recipient() -> String {
    "perf-reports@example.com".to_string()
}
