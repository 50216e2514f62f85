// src/tasks/sweep_trigger.rs
//
// The boundary between whoever fires the sweep (scheduler, manual GET) and the
// sweep itself. Nothing below this point escapes as an error.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info};

use clientdesk_common::traits::repository_traits::ClientRepository;

use crate::services::config_service::ConfigService;
use crate::tasks::inactivity_sweep::run_inactivity_sweep;
use crate::utils::time::{iso_now, now_ms};

pub const SWEEP_FAILURE_MESSAGE: &str = "Failed to process inactive clients";

/// Response envelope of `/check-inactive-clients`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_count: Option<usize>,
    pub timestamp: String,
}

impl SweepReport {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            days_threshold: None,
            automation_enabled: None,
            updated_count: None,
            timestamp: iso_now(),
        }
    }
}

#[derive(Clone)]
pub struct SweepTrigger {
    config: ConfigService,
    clients: Arc<dyn ClientRepository>,
}

impl SweepTrigger {
    pub fn new(config: ConfigService, clients: Arc<dyn ClientRepository>) -> Self {
        Self { config, clients }
    }

    /// `threshold_override` (the `?days=N` query) wins over the stored threshold
    /// when it is positive.
    pub async fn run(&self, threshold_override: Option<u32>) -> SweepReport {
        let enabled = self.config.enabled_or_default().await;
        if !enabled {
            info!("Inactivity sweep skipped: automation disabled");
            return SweepReport {
                success: true,
                message: Some("Automation disabled".to_string()),
                error: None,
                days_threshold: None,
                automation_enabled: Some(false),
                updated_count: None,
                timestamp: iso_now(),
            };
        }

        let threshold = match threshold_override.filter(|d| *d > 0) {
            Some(days) => days,
            None => self.config.threshold_or_default().await,
        };

        match run_inactivity_sweep(self.clients.as_ref(), threshold, now_ms()).await {
            Ok(outcome) => SweepReport {
                success: true,
                message: Some(format!(
                    "Updated {} clients to inactive status",
                    outcome.updated_count
                )),
                error: None,
                days_threshold: Some(threshold),
                automation_enabled: Some(true),
                updated_count: Some(outcome.updated_count),
                timestamp: iso_now(),
            },
            Err(e) => {
                error!("Inactivity sweep failed: {}", e);
                SweepReport::failure(SWEEP_FAILURE_MESSAGE)
            }
        }
    }
}
