// File: clientdesk-core/tests/config_tests.rs

use std::sync::Arc;

use serde_json::json;

use clientdesk_common::models::{AutomationSetting, CheckFrequency, ConfigEntry, ConfigKey};
use clientdesk_core::repositories::{AutomationConfigRepository, InMemoryAutomationConfigRepository};
use clientdesk_core::services::ConfigService;
use clientdesk_core::Error;

fn service() -> (ConfigService, Arc<InMemoryAutomationConfigRepository>) {
    let repo = Arc::new(InMemoryAutomationConfigRepository::new());
    (ConfigService::new(repo.clone()), repo)
}

#[tokio::test]
async fn empty_store_resolves_to_defaults() {
    let (config, _) = service();
    assert!(config.enabled_or_default().await);
    assert_eq!(config.threshold_or_default().await, 30);
    assert_eq!(config.get(ConfigKey::CheckFrequency).await.unwrap(), None);

    let all = config.get_all().await.unwrap();
    assert_eq!(serde_json::to_value(&all).unwrap(), json!({}));
}

#[tokio::test]
async fn initialize_writes_defaults_once_and_keeps_existing_values() -> Result<(), Error> {
    let (config, _) = service();
    config.set(AutomationSetting::InactiveDaysThreshold(45), None).await?;

    assert_eq!(config.initialize_defaults().await?, 2);
    assert_eq!(config.initialize_defaults().await?, 0);

    let all = config.get_all().await?;
    assert_eq!(all.inactive_days_threshold, Some(45));
    assert_eq!(all.check_frequency, Some(CheckFrequency::Daily));
    assert_eq!(all.automation_enabled, Some(true));
    Ok(())
}

#[tokio::test]
async fn set_raw_rejects_wrong_types() -> Result<(), Error> {
    let (config, _) = service();

    let err = config
        .set_raw(ConfigKey::InactiveDaysThreshold, &json!("30"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(config
        .set_raw(ConfigKey::InactiveDaysThreshold, &json!(0), None)
        .await
        .is_err());
    assert!(config
        .set_raw(ConfigKey::AutomationEnabled, &json!("yes"), None)
        .await
        .is_err());
    assert!(config
        .set_raw(ConfigKey::CheckFrequency, &json!("hourly"), None)
        .await
        .is_err());

    assert_eq!(config.get(ConfigKey::InactiveDaysThreshold).await?, None);

    let stored = config
        .set_raw(ConfigKey::CheckFrequency, &json!("24h"), None)
        .await?;
    assert_eq!(stored, AutomationSetting::CheckFrequency(CheckFrequency::Daily));
    Ok(())
}

#[tokio::test]
async fn malformed_stored_value_counts_as_absent() -> Result<(), Error> {
    let (config, repo) = service();
    repo.upsert_entry(&ConfigEntry {
        key: "inactive_days_threshold".into(),
        value: json!("thirty"),
        description: None,
        updated_at: 0,
    })
    .await?;
    repo.upsert_entry(&ConfigEntry {
        key: "some_other_key".into(),
        value: json!(1),
        description: None,
        updated_at: 0,
    })
    .await?;

    assert_eq!(config.get(ConfigKey::InactiveDaysThreshold).await?, None);
    assert_eq!(config.threshold_or_default().await, 30);
    assert_eq!(config.get_all().await?.inactive_days_threshold, None);
    Ok(())
}

#[tokio::test]
async fn upsert_keeps_description_when_not_given() -> Result<(), Error> {
    let (config, repo) = service();
    config.initialize_defaults().await?;
    config.set(AutomationSetting::AutomationEnabled(false), None).await?;

    let entry = repo.get_entry("automation_enabled").await?.expect("row exists");
    assert_eq!(entry.value, json!(false));
    assert!(entry.description.is_some());
    assert!(!config.enabled_or_default().await);
    Ok(())
}
