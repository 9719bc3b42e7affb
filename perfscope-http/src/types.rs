//! Chat endpoint request and response types

use serde::{Deserialize, Serialize};

/// JSON body sent to the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// ISO-8601 send time
    pub timestamp: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: timestamp.into(),
        }
    }
}

/// Raw response from the chat endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub status: u16,
    pub body: String,
}

impl ChatResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in `[200, 300)`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
