// tests/advisor_tests.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use clientdesk_ai::{ChatMessage, ClassificationAdvisor, ModelProvider};
use clientdesk_common::models::{ClientPriority, ClientSnapshot, ClientStatus};

/// Returns a canned answer and remembers what it was asked.
struct CannedProvider {
    answer: Result<String, String>,
    seen: Mutex<Vec<(Vec<ChatMessage>, Option<u32>)>>,
}

impl CannedProvider {
    fn answering(text: &str) -> Arc<Self> {
        Arc::new(Self { answer: Ok(text.to_string()), seen: Mutex::new(Vec::new()) })
    }

    fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self { answer: Err(msg.to_string()), seen: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl ModelProvider for CannedProvider {
    fn name(&self) -> &str {
        "canned"
    }

    async fn chat(&self, messages: Vec<ChatMessage>, max_tokens: Option<u32>) -> anyhow::Result<String> {
        self.seen.lock().unwrap().push((messages, max_tokens));
        self.answer.clone().map_err(|e| anyhow::anyhow!(e))
    }
}

fn client() -> ClientSnapshot {
    ClientSnapshot {
        name: "Sofia López".into(),
        phone: "+54 11 5678-9012".into(),
        status: ClientStatus::Potential,
        priority: ClientPriority::High,
        last_interaction_at: 0,
        interactions: vec![],
    }
}

#[tokio::test]
async fn categorize_parses_strict_json_with_token_cap() {
    let provider = CannedProvider::answering(r#"{"category":"Activo","justification":"ok"}"#);
    let advisor = ClassificationAdvisor::new(provider.clone());

    let result = advisor.categorize(&client(), 0).await.unwrap();
    assert_eq!(result.category, ClientStatus::Active);
    assert_eq!(result.justification, "ok");

    let seen = provider.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].1, Some(200));
    assert!(seen[0].0[0].content.contains("Sofia López"));
}

#[tokio::test]
async fn categorize_falls_back_then_fails() {
    let advisor = ClassificationAdvisor::new(CannedProvider::answering("Diría que Inactivo."));
    let result = advisor.categorize(&client(), 0).await.unwrap();
    assert_eq!(result.category, ClientStatus::Inactive);

    let advisor = ClassificationAdvisor::new(CannedProvider::answering("sin datos"));
    assert!(advisor.categorize(&client(), 0).await.is_err());
}

#[tokio::test]
async fn summarize_returns_text_verbatim_and_surfaces_upstream_errors() {
    let provider = CannedProvider::answering("Cliente potencial. Prioridad recomendada: Alta.");
    let advisor = ClassificationAdvisor::new(provider.clone());
    let text = advisor.summarize(&client(), 0).await.unwrap();
    assert_eq!(text, "Cliente potencial. Prioridad recomendada: Alta.");
    assert_eq!(provider.seen.lock().unwrap()[0].1, None);

    let advisor = ClassificationAdvisor::new(CannedProvider::failing("upstream 503"));
    let err = advisor.summarize(&client(), 0).await.unwrap_err();
    assert!(format!("{:#}", err).contains("upstream 503"));
}
