// src/web/handlers/config.rs

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use clientdesk_common::models::{AutomationSettings, ConfigKey};

use crate::web::error::ApiResult;
use crate::web::handlers::parse_body;
use crate::web::AppState;
use crate::Error;

pub async fn get_all(State(state): State<AppState>) -> ApiResult<Json<AutomationSettings>> {
    Ok(Json(state.config.get_all().await?))
}

pub async fn initialize(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let written = state.config.initialize_defaults().await?;
    Ok(Json(json!({ "success": true, "initialized": written })))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<Value>> {
    let key: ConfigKey = key.parse()?;
    let setting = state
        .config
        .get(key)
        .await?
        .ok_or_else(|| Error::NotFound(format!("No value stored for {}", key)))?;
    Ok(Json(json!({ "key": key.as_str(), "value": setting.to_json() })))
}

#[derive(Debug, Deserialize)]
struct PutConfig {
    value: Value,
    description: Option<String>,
}

pub async fn put_one(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let key: ConfigKey = key.parse()?;
    let req: PutConfig = parse_body(&body)?;
    let setting = state.config.set_raw(key, &req.value, req.description).await?;
    Ok(Json(json!({ "success": true, "key": key.as_str(), "value": setting.to_json() })))
}
