// src/scheduler/qstash.rs

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::Error;

pub const DEFAULT_QSTASH_URL: &str = "https://qstash.upstash.io";

/// A schedule to register: POST `destination` whenever `cron` fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub destination: String,
    pub cron: String,
    pub body: Option<String>,
}

/// One registered schedule as reported by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleInfo {
    #[serde(rename(deserialize = "scheduleId", serialize = "id"))]
    pub schedule_id: String,
    pub cron: String,
    pub destination: String,
    #[serde(rename(deserialize = "createdAt", serialize = "created"), default)]
    pub created_at: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleRegistry: Send + Sync {
    /// Registers the schedule and returns the id the scheduler assigned.
    async fn create_schedule(&self, request: ScheduleRequest) -> Result<String, Error>;
    async fn list_schedules(&self) -> Result<Vec<ScheduleInfo>, Error>;
}

/// Checks a 5-field cron expression (`min hour dom month dow`).
/// The `cron` crate wants a leading seconds field, so one is added before parsing.
pub fn validate_cron(expr: &str) -> Result<(), Error> {
    let fields = expr.split_whitespace().count();
    if fields != 5 {
        return Err(Error::Parse(format!(
            "Cron expression '{}' must have 5 fields, found {}",
            expr, fields
        )));
    }
    cron::Schedule::from_str(&format!("0 {}", expr))
        .map(|_| ())
        .map_err(|e| Error::Parse(format!("Invalid cron expression '{}': {}", expr, e)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateScheduleResponse {
    schedule_id: String,
}

/// Client for the QStash v2 schedules API.
pub struct QstashClient {
    base_url: String,
    token: String,
    client: Client,
}

impl QstashClient {
    pub fn new(base_url: Option<String>, token: String) -> Self {
        Self::with_client(base_url, token, Client::new())
    }

    pub fn with_client(base_url: Option<String>, token: String, client: Client) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_QSTASH_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self { base_url, token, client }
    }

    fn schedules_url(&self) -> String {
        format!("{}/v2/schedules", self.base_url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(Error::Scheduler(format!("QStash returned {}: {}", status, text)))
    }
}

#[async_trait]
impl ScheduleRegistry for QstashClient {
    async fn create_schedule(&self, request: ScheduleRequest) -> Result<String, Error> {
        validate_cron(&request.cron)?;
        url::Url::parse(&request.destination)
            .map_err(|e| Error::InvalidUri(format!("{}: {}", request.destination, e)))?;

        // QStash takes the destination verbatim as the trailing path segment.
        let endpoint = format!("{}/{}", self.schedules_url(), request.destination);
        debug!("Registering schedule '{}' -> {}", request.cron, request.destination);

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.token)
            .header("Upstash-Cron", &request.cron)
            .header("Content-Type", "application/json")
            .body(request.body.clone().unwrap_or_default())
            .send()
            .await?;

        let created: CreateScheduleResponse = Self::check_status(response).await?.json().await?;
        info!(
            "Schedule {} created ({} -> {})",
            created.schedule_id, request.cron, request.destination
        );
        Ok(created.schedule_id)
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleInfo>, Error> {
        let response = self
            .client
            .get(self.schedules_url())
            .bearer_auth(&self.token)
            .send()
            .await?;

        let schedules: Vec<ScheduleInfo> = Self::check_status(response).await?.json().await?;
        Ok(schedules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_frequency_presets() {
        for expr in ["0 9 * * *", "0 9,18 * * *", "0 9 * * 1", "0 */6 * * *", "0 */12 * * *"] {
            assert!(validate_cron(expr).is_ok(), "{expr} should be valid");
        }
    }

    #[test]
    fn rejects_bad_cron() {
        assert!(matches!(validate_cron("0 9 * *"), Err(Error::Parse(_))));
        assert!(matches!(validate_cron("0 25 * * *"), Err(Error::Parse(_))));
        assert!(matches!(validate_cron("every day"), Err(Error::Parse(_))));
    }

    #[test]
    fn schedule_info_reads_qstash_names_and_writes_short_ones() {
        let raw = r#"{"scheduleId":"scd_1","cron":"0 9 * * *","destination":"https://x.test/check-inactive-clients","createdAt":1700000000000,"retries":3}"#;
        let info: ScheduleInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.schedule_id, "scd_1");
        assert_eq!(info.created_at, 1_700_000_000_000);

        let out = serde_json::to_value(&info).unwrap();
        assert_eq!(out["id"], "scd_1");
        assert_eq!(out["created"], 1_700_000_000_000i64);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = QstashClient::new(Some("http://localhost:8080/".into()), "t".into());
        assert_eq!(client.schedules_url(), "http://localhost:8080/v2/schedules");
    }

    #[tokio::test]
    async fn mock_registry_returns_id() {
        let mut mock = MockScheduleRegistry::new();
        mock.expect_create_schedule()
            .withf(|r| r.cron == "0 9 * * *")
            .returning(|_| Ok("scd_42".to_string()));
        let id = mock
            .create_schedule(ScheduleRequest {
                destination: "http://localhost:3000/check-inactive-clients".into(),
                cron: "0 9 * * *".into(),
                body: None,
            })
            .await
            .unwrap();
        assert_eq!(id, "scd_42");
    }
}
