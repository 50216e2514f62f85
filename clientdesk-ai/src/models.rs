use serde::{Serialize, Deserialize};
use std::collections::HashMap;

pub const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Configuration for an AI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for API requests
    pub api_base: Option<String>,

    /// API key for authentication
    pub api_key: String,

    /// Default model to use with this provider
    pub default_model: String,

    /// Additional provider-specific options (e.g. "system_prompt", "temperature")
    pub options: HashMap<String, String>,
}

impl ProviderConfig {
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_base: None,
            api_key: api_key.into(),
            default_model: DEFAULT_OPENAI_MODEL.to_string(),
            options: HashMap::new(),
        }
    }

    pub fn api_base_or_default(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_OPENAI_API_BASE)
    }
}
