// src/web/handlers/sweep.rs

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use crate::scheduler::signature::SIGNATURE_HEADER;
use crate::tasks::SweepReport;
use crate::utils::time::current_epoch;
use crate::web::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SweepQuery {
    days: Option<String>,
}

impl SweepQuery {
    /// Positive integer override, anything else is ignored.
    fn threshold_override(&self) -> Option<u32> {
        let raw = self.days.as_deref()?.trim();
        match raw.parse::<u32>() {
            Ok(days) if days > 0 => Some(days),
            _ => {
                warn!("Ignoring invalid days override '{}'", raw);
                None
            }
        }
    }
}

fn respond(report: SweepReport) -> (StatusCode, Json<SweepReport>) {
    let status = if report.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(report))
}

/// GET: manual trigger, no signature required.
pub async fn manual_trigger(
    State(state): State<AppState>,
    Query(query): Query<SweepQuery>,
) -> (StatusCode, Json<SweepReport>) {
    info!("Inactivity sweep triggered manually");
    respond(state.sweep.run(query.threshold_override()).await)
}

/// POST: scheduler callback. Rejected with 401 unless the signature checks out.
pub async fn scheduled_trigger(
    State(state): State<AppState>,
    Query(query): Query<SweepQuery>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<SweepReport>) {
    let unauthorized = |reason: &str| {
        warn!("Rejected scheduler callback: {}", reason);
        (StatusCode::UNAUTHORIZED, Json(SweepReport::failure("Unauthorized")))
    };

    let Some(verifier) = state.verifier.as_ref() else {
        return unauthorized("no signing keys configured");
    };
    let Some(signature) = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) else {
        return unauthorized("missing signature header");
    };

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/check-inactive-clients");
    let url = format!("{}{}", state.base_url, path);
    if let Err(e) = verifier.verify(signature, &body, Some(&url), current_epoch()) {
        return unauthorized(&e.to_string());
    }

    info!("Inactivity sweep triggered by scheduler");
    respond(state.sweep.run(query.threshold_override()).await)
}
