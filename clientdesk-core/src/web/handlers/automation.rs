// src/web/handlers/automation.rs

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use clientdesk_common::models::automation::DEFAULT_SCHEDULE_CRON;
use clientdesk_common::models::{AutomationSetting, CheckFrequency};

use crate::scheduler::{validate_cron, ScheduleRegistry, ScheduleRequest};
use crate::web::error::ApiResult;
use crate::web::AppState;
use crate::Error;

#[derive(Debug, Default, Deserialize)]
pub struct SetupRequest {
    schedule: Option<String>,
    frequency: Option<String>,
}

/// Registers the sweep webhook with the scheduler. A `frequency` label wins over a
/// raw `schedule` and is persisted as `check_frequency`.
pub async fn setup_automation(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let request: SetupRequest = if body.iter().all(u8::is_ascii_whitespace) {
        SetupRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(Error::from)?
    };

    let frequency = request
        .frequency
        .as_deref()
        .map(str::parse::<CheckFrequency>)
        .transpose()?;
    let cron = match (frequency, request.schedule) {
        (Some(freq), _) => freq.cron().to_string(),
        (None, Some(schedule)) => schedule.trim().to_string(),
        (None, None) => DEFAULT_SCHEDULE_CRON.to_string(),
    };
    validate_cron(&cron)?;

    let Some(scheduler) = state.scheduler.as_ref() else {
        return Ok(setup_failure("Scheduler is not configured".to_string()));
    };

    let webhook_url = state.webhook_url();
    let schedule_request = ScheduleRequest {
        destination: webhook_url.clone(),
        cron: cron.clone(),
        body: Some(json!({ "action": "check_inactive_clients" }).to_string()),
    };
    let schedule_id = match scheduler.create_schedule(schedule_request).await {
        Ok(id) => id,
        Err(e) => {
            error!("Scheduler setup failed: {}", e);
            return Ok(setup_failure(e.to_string()));
        }
    };

    if let Some(freq) = frequency {
        state
            .config
            .set(AutomationSetting::CheckFrequency(freq), None)
            .await?;
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Automation configured successfully",
            "scheduleId": schedule_id,
            "schedule": cron,
            "frequency": frequency.map(|f| f.label()),
            "webhookUrl": webhook_url,
        })),
    ))
}

fn setup_failure(details: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "Failed to setup automation",
            "details": details,
        })),
    )
}

pub async fn list_schedules(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let result = match state.scheduler.as_ref() {
        Some(scheduler) => scheduler.list_schedules().await,
        None => Err(Error::Scheduler("Scheduler is not configured".into())),
    };
    match result {
        Ok(schedules) => (
            StatusCode::OK,
            Json(json!({ "success": true, "schedules": schedules })),
        ),
        Err(e) => {
            error!("Listing schedules failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "error": "Failed to fetch schedules" })),
            )
        }
    }
}
