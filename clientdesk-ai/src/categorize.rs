//! Parsing of the categorize answer.
//!
//! The model is asked for `{"category": ..., "justification": ...}` but nothing
//! guarantees it complies. Parsing goes through two tiers:
//!
//! 1. strict JSON with a known label and a non-empty justification;
//! 2. the first status label found anywhere in the text, with a generic justification.
//!
//! If neither tier yields a label the answer is rejected.

use std::sync::OnceLock;

use clientdesk_common::models::ClientStatus;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: ClientStatus,
    pub justification: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CategorizeError {
    #[error("Could not parse AI response: no status label found")]
    NoLabel,
}

#[derive(Debug, Deserialize)]
struct RawCategorization {
    category: String,
    #[serde(default)]
    justification: Option<String>,
}

fn label_regex() -> &'static Regex {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        Regex::new(r"(?i)(Activo|Potencial|Inactivo)").expect("static label regex is valid")
    })
}

pub fn generic_justification(category: ClientStatus) -> String {
    format!(
        "Estado actualizado a {} basado en el análisis de interacciones.",
        category.label()
    )
}

fn parse_strict(raw: &str) -> Option<Categorization> {
    let parsed: RawCategorization = serde_json::from_str(raw.trim()).ok()?;
    let category = parsed.category.parse::<ClientStatus>().ok()?;
    let justification = parsed.justification?.trim().to_string();
    if justification.is_empty() {
        return None;
    }
    Some(Categorization { category, justification })
}

fn parse_fallback(raw: &str) -> Option<Categorization> {
    let found = label_regex().find(raw)?;
    let category = ClientStatus::from_label_ignore_case(found.as_str())?;
    Some(Categorization {
        category,
        justification: generic_justification(category),
    })
}

/// Best-effort single-label extraction from a model answer.
pub fn parse_categorization(raw: &str) -> Result<Categorization, CategorizeError> {
    if let Some(strict) = parse_strict(raw) {
        return Ok(strict);
    }
    tracing::debug!("Categorize answer is not valid JSON, falling back to label search");
    parse_fallback(raw).ok_or(CategorizeError::NoLabel)
}
