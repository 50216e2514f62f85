use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::models::ProviderConfig;
use crate::traits::{ChatMessage, ModelProvider};

/// OpenAI-compatible chat completions provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> Self {
        let client = Client::new();
        Self { config, client }
    }

    fn build_payload(&self, messages: &[ChatMessage], max_tokens: Option<u32>) -> serde_json::Value {
        let mut all_messages = Vec::new();

        // Add system message from config if the caller did not supply one
        if !messages.iter().any(|msg| msg.role == "system") {
            if let Some(system_prompt) = self.config.options.get("system_prompt") {
                all_messages.push(json!({
                    "role": "system",
                    "content": system_prompt
                }));
            }
        }

        all_messages.extend(messages.iter().map(|msg| {
            json!({
                "role": msg.role,
                "content": msg.content
            })
        }));

        let mut payload = json!({
            "model": self.config.default_model,
            "messages": all_messages,
        });

        if let Some(max) = max_tokens {
            payload["max_tokens"] = json!(max);
        }
        if let Some(temp) = self
            .config
            .options
            .get("temperature")
            .and_then(|t| t.parse::<f64>().ok())
        {
            payload["temperature"] = json!(temp);
        }

        payload
    }
}

/// Pulls `choices[0].message.content` out of a chat completions response body.
pub(crate) fn extract_chat_content(data: &serde_json::Value) -> anyhow::Result<String> {
    // Check for API errors
    if let Some(error) = data.get("error") {
        tracing::error!("API returned error: {:?}", error);
        let error_message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error");
        return Err(anyhow::anyhow!("API error: {}", error_message));
    }

    let choices = data
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| anyhow::anyhow!("Response missing 'choices' array"))?;

    let first = choices
        .first()
        .ok_or_else(|| anyhow::anyhow!("No completions returned"))?;

    let content = first
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| anyhow::anyhow!("Response message missing 'content'"))?;

    Ok(content.to_string())
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: Option<u32>) -> anyhow::Result<String> {
        let api_base = self.config.api_base_or_default();
        let payload = self.build_payload(&messages, max_tokens);

        tracing::debug!("Making API call to {}/chat/completions (model={})", api_base, self.config.default_model);

        let response = self
            .client
            .post(format!("{}/chat/completions", api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&payload)
            .send()
            .await?;

        // Get the raw response text first for better error handling
        let response_text = response.text().await?;
        tracing::trace!("Raw API response: {}", response_text);

        let data = match serde_json::from_str::<serde_json::Value>(&response_text) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to parse API response as JSON: {:?}", e);
                return Err(anyhow::anyhow!("API returned non-JSON response: {}", e));
            }
        };

        extract_chat_content(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_includes_system_prompt_and_token_cap() {
        let mut config = ProviderConfig::openai("sk-test");
        config
            .options
            .insert("system_prompt".into(), "Eres un asistente de CRM.".into());
        let provider = OpenAIProvider::new(config);

        let payload = provider.build_payload(&[ChatMessage::user("hola")], Some(200));
        assert_eq!(payload["model"], "gpt-4o-mini");
        assert_eq!(payload["max_tokens"], 200);
        assert_eq!(payload["messages"][0]["role"], "system");
        assert_eq!(payload["messages"][1]["content"], "hola");

        let payload = provider.build_payload(&[ChatMessage::system("x"), ChatMessage::user("y")], None);
        assert!(payload.get("max_tokens").is_none());
        assert_eq!(payload["messages"].as_array().map(|m| m.len()), Some(2));
    }

    #[test]
    fn extracts_first_choice_or_reports_api_error() {
        let ok = json!({"choices": [{"message": {"role": "assistant", "content": "listo"}}]});
        assert_eq!(extract_chat_content(&ok).unwrap(), "listo");

        let err = json!({"error": {"message": "quota exceeded"}});
        let msg = extract_chat_content(&err).unwrap_err().to_string();
        assert!(msg.contains("quota exceeded"));

        let empty = json!({"choices": []});
        assert!(extract_chat_content(&empty).is_err());
    }
}
