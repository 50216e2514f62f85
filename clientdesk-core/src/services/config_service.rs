// File: clientdesk-core/src/services/config_service.rs
//
// Typed access to the automation settings stored in `automation_config`.

use std::sync::Arc;

use serde_json::Value as JsonValue;
use tracing::{info, warn};

use clientdesk_common::models::automation::{DEFAULT_AUTOMATION_ENABLED, DEFAULT_INACTIVE_DAYS_THRESHOLD};
use clientdesk_common::models::{AutomationSetting, AutomationSettings, ConfigEntry, ConfigKey};
use clientdesk_common::traits::repository_traits::AutomationConfigRepository;

use crate::utils::time::now_ms;
use crate::Error;

#[derive(Clone)]
pub struct ConfigService {
    repo: Arc<dyn AutomationConfigRepository>,
}

impl ConfigService {
    pub fn new(repo: Arc<dyn AutomationConfigRepository>) -> Self {
        Self { repo }
    }

    /// Decodes a stored row; a value of the wrong shape counts as absent.
    fn decode(key: ConfigKey, entry: &ConfigEntry) -> Option<AutomationSetting> {
        match AutomationSetting::from_json(key, &entry.value) {
            Ok(setting) => Some(setting),
            Err(e) => {
                warn!("Ignoring stored config '{}': {}", key, e);
                None
            }
        }
    }

    pub async fn get(&self, key: ConfigKey) -> Result<Option<AutomationSetting>, Error> {
        let entry = self.repo.get_entry(key.as_str()).await?;
        Ok(entry.and_then(|e| Self::decode(key, &e)))
    }

    /// Every recognized key that is present. Unknown keys in the table are skipped.
    pub async fn get_all(&self) -> Result<AutomationSettings, Error> {
        let mut settings = AutomationSettings::default();
        for entry in self.repo.list_entries().await? {
            let Ok(key) = entry.key.parse::<ConfigKey>() else {
                continue;
            };
            if let Some(setting) = Self::decode(key, &entry) {
                settings.insert(setting);
            }
        }
        Ok(settings)
    }

    /// Upsert: patch the row when the key exists, insert otherwise.
    pub async fn set(&self, setting: AutomationSetting, description: Option<String>) -> Result<(), Error> {
        let key = setting.key();
        let entry = ConfigEntry {
            key: key.as_str().to_string(),
            value: setting.to_json(),
            description,
            updated_at: now_ms(),
        };
        self.repo.upsert_entry(&entry).await?;
        info!("Automation config '{}' set to {}", key, entry.value);
        Ok(())
    }

    /// Admin-surface write of an untyped JSON value; rejected unless it decodes to the key's type.
    pub async fn set_raw(
        &self,
        key: ConfigKey,
        value: &JsonValue,
        description: Option<String>,
    ) -> Result<AutomationSetting, Error> {
        let setting = AutomationSetting::from_json(key, value)?;
        self.set(setting, description).await?;
        Ok(setting)
    }

    /// Writes the default for each key that has no row yet. Returns how many were written.
    pub async fn initialize_defaults(&self) -> Result<usize, Error> {
        let mut written = 0;
        for key in ConfigKey::ALL {
            let entry = ConfigEntry {
                key: key.as_str().to_string(),
                value: key.default_setting().to_json(),
                description: Some(key.default_description().to_string()),
                updated_at: now_ms(),
            };
            if self.repo.insert_if_absent(&entry).await? {
                written += 1;
            }
        }
        info!("Automation config initialized ({} default(s) written)", written);
        Ok(written)
    }

    /// `automation_enabled`, defaulting to true when absent or unreadable.
    pub async fn enabled_or_default(&self) -> bool {
        match self.get(ConfigKey::AutomationEnabled).await {
            Ok(Some(AutomationSetting::AutomationEnabled(enabled))) => enabled,
            Ok(_) => DEFAULT_AUTOMATION_ENABLED,
            Err(e) => {
                warn!("Could not read automation_enabled, assuming {}: {}", DEFAULT_AUTOMATION_ENABLED, e);
                DEFAULT_AUTOMATION_ENABLED
            }
        }
    }

    /// `inactive_days_threshold`, defaulting to 30 when absent or unreadable.
    pub async fn threshold_or_default(&self) -> u32 {
        match self.get(ConfigKey::InactiveDaysThreshold).await {
            Ok(Some(AutomationSetting::InactiveDaysThreshold(days))) => days,
            Ok(_) => DEFAULT_INACTIVE_DAYS_THRESHOLD,
            Err(e) => {
                warn!(
                    "Could not read inactive_days_threshold, using {} days: {}",
                    DEFAULT_INACTIVE_DAYS_THRESHOLD, e
                );
                DEFAULT_INACTIVE_DAYS_THRESHOLD
            }
        }
    }
}
