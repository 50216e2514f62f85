// src/web/handlers/advisor.rs

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use clientdesk_common::models::ClientSnapshot;

use crate::utils::time::now_ms;
use crate::web::AppState;

const ANALYZE_FAILURE: &str = "Error al analizar cliente";
const CATEGORIZE_FAILURE: &str = "Error al categorizar cliente";

#[derive(Debug, Deserialize)]
struct AdvisorRequest {
    client: ClientSnapshot,
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

fn parse_request(body: &[u8]) -> Result<ClientSnapshot, serde_json::Error> {
    serde_json::from_slice::<AdvisorRequest>(body).map(|r| r.client)
}

pub async fn analyze_client(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let client = match parse_request(&body) {
        Ok(client) => client,
        Err(e) => {
            error!("Bad analyze request: {}", e);
            return failure(StatusCode::BAD_REQUEST, ANALYZE_FAILURE);
        }
    };
    let Some(advisor) = state.advisor.as_ref() else {
        error!("Analyze requested but no model provider is configured");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, ANALYZE_FAILURE);
    };

    match advisor.summarize(&client, now_ms()).await {
        Ok(analysis) => (StatusCode::OK, Json(json!({ "analysis": analysis }))),
        Err(e) => {
            error!("Client analysis failed: {:#}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, ANALYZE_FAILURE)
        }
    }
}

pub async fn categorize_client(State(state): State<AppState>, body: Bytes) -> (StatusCode, Json<Value>) {
    let client = match parse_request(&body) {
        Ok(client) => client,
        Err(e) => {
            error!("Bad categorize request: {}", e);
            return failure(StatusCode::BAD_REQUEST, CATEGORIZE_FAILURE);
        }
    };
    let Some(advisor) = state.advisor.as_ref() else {
        error!("Categorize requested but no model provider is configured");
        return failure(StatusCode::INTERNAL_SERVER_ERROR, CATEGORIZE_FAILURE);
    };

    match advisor.categorize(&client, now_ms()).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "category": result.category,
                "justification": result.justification,
            })),
        ),
        Err(e) => {
            error!("Client categorization failed: {:#}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, CATEGORIZE_FAILURE)
        }
    }
}
