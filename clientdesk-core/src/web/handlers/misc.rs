// src/web/handlers/misc.rs

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use clientdesk_common::models::client::DEFAULT_INTERACTION_TYPES;

use crate::web::AppState;

#[derive(Debug, Deserialize)]
struct SeedRequest {
    action: Option<String>,
}

/// `{"action": "seed" | "clear"}`
pub async fn seed_data(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let action = serde_json::from_slice::<SeedRequest>(&body)
        .ok()
        .and_then(|r| r.action);

    let result = match action.as_deref() {
        Some("seed") => state.seed.seed().await.map(|s| json!(s)),
        Some("clear") => state.seed.clear().await.map(|s| json!(s)),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Acción no válida" })),
            );
        }
    };

    match result {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => {
            error!("Seed data request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Error interno del servidor" })),
            )
        }
    }
}

pub async fn interaction_types() -> Json<&'static [&'static str]> {
    Json(DEFAULT_INTERACTION_TYPES)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
