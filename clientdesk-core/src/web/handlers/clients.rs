// src/web/handlers/clients.rs

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use clientdesk_common::models::{
    AiAnalysis, ClientPriority, ClientQuery, ClientRecord, ClientUpdate, Interaction, NewClient,
};

use crate::services::StatusCounts;
use crate::web::error::ApiResult;
use crate::web::handlers::{parse_body, parse_id};
use crate::web::AppState;

pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> ApiResult<Json<Value>> {
    let page = state.clients.query_clients(&query).await?;
    Ok(Json(json!({
        "success": true,
        "clients": page.clients,
        "isDone": page.is_done,
        "totalCount": page.total_count,
    })))
}

pub async fn create_client(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<ClientRecord>)> {
    let new_client: NewClient = parse_body(&body)?;
    let client = state.clients.create_client(new_client).await?;
    Ok((
        StatusCode::CREATED,
        Json(ClientRecord { client, interactions: Vec::new(), ai_analyses: Vec::new() }),
    ))
}

pub async fn count_clients(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let count = state.clients.count_clients().await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn client_stats(State(state): State<AppState>) -> ApiResult<Json<StatusCounts>> {
    Ok(Json(state.clients.status_counts().await?))
}

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientRecord>> {
    let id = parse_id(&id)?;
    Ok(Json(state.clients.get_client(id).await?))
}

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<ClientRecord>> {
    let id = parse_id(&id)?;
    let update: ClientUpdate = parse_body(&body)?;
    Ok(Json(state.clients.update_client(id, update).await?))
}

#[derive(Debug, Deserialize)]
struct NewInteraction {
    description: String,
    #[serde(rename = "type")]
    kind: String,
}

pub async fn add_interaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Interaction>)> {
    let id = parse_id(&id)?;
    let req: NewInteraction = parse_body(&body)?;
    let interaction = state
        .clients
        .add_interaction(id, &req.description, &req.kind)
        .await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

#[derive(Debug, Deserialize)]
struct NewAnalysis {
    analysis: String,
    priority: Option<ClientPriority>,
}

pub async fn add_analysis(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<AiAnalysis>)> {
    let id = parse_id(&id)?;
    let req: NewAnalysis = parse_body(&body)?;
    let entry = state
        .clients
        .add_ai_analysis(id, &req.analysis, req.priority)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}
