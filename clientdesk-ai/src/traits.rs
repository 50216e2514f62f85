use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single chat turn sent to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// A hosted text-generation model: text in, text out.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Name of the provider
    fn name(&self) -> &str;

    /// Chat completion. `max_tokens` of `None` leaves the provider default.
    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: Option<u32>) -> anyhow::Result<String>;
}
