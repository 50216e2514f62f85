use std::sync::Arc;

use anyhow::Context;
use clientdesk_common::models::ClientSnapshot;
use tracing::{debug, info};

use crate::categorize::{parse_categorization, Categorization};
use crate::prompts::{categorize_prompt, summary_prompt};
use crate::traits::{ChatMessage, ModelProvider};

pub const CATEGORIZE_MAX_TOKENS: u32 = 200;

/// Classification Advisor: free-text summaries and coarse status labels for a client.
/// Single-shot calls, no retries.
#[derive(Clone)]
pub struct ClassificationAdvisor {
    provider: Arc<dyn ModelProvider>,
}

impl ClassificationAdvisor {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Free-text relationship summary, returned verbatim.
    pub async fn summarize(&self, client: &ClientSnapshot, now_ms: i64) -> anyhow::Result<String> {
        let prompt = summary_prompt(client, now_ms);
        debug!("Requesting summary for client '{}'", client.name);
        let text = self
            .provider
            .chat(vec![ChatMessage::user(prompt)], None)
            .await
            .context("summary request failed")?;
        Ok(text)
    }

    /// Coarse status label with justification.
    pub async fn categorize(&self, client: &ClientSnapshot, now_ms: i64) -> anyhow::Result<Categorization> {
        let prompt = categorize_prompt(client, now_ms);
        let raw = self
            .provider
            .chat(vec![ChatMessage::user(prompt)], Some(CATEGORIZE_MAX_TOKENS))
            .await
            .context("categorize request failed")?;

        let result = parse_categorization(&raw)?;
        info!(
            "Client '{}' categorized as {} (was {})",
            client.name, result.category, client.status
        );
        Ok(result)
    }
}
