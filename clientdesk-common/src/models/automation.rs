// File: clientdesk-common/src/models/automation.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Error;

pub const DEFAULT_INACTIVE_DAYS_THRESHOLD: u32 = 30;
pub const DEFAULT_AUTOMATION_ENABLED: bool = true;
pub const DEFAULT_SCHEDULE_CRON: &str = "0 9 * * *";

/// The closed set of keys the configuration store recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    InactiveDaysThreshold,
    CheckFrequency,
    AutomationEnabled,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::InactiveDaysThreshold,
        ConfigKey::CheckFrequency,
        ConfigKey::AutomationEnabled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::InactiveDaysThreshold => "inactive_days_threshold",
            ConfigKey::CheckFrequency => "check_frequency",
            ConfigKey::AutomationEnabled => "automation_enabled",
        }
    }

    pub fn default_description(&self) -> &'static str {
        match self {
            ConfigKey::InactiveDaysThreshold => {
                "Number of days after which a client is considered inactive"
            }
            ConfigKey::CheckFrequency => "How often to check for inactive clients",
            ConfigKey::AutomationEnabled => "Whether automation is enabled",
        }
    }

    pub fn default_setting(&self) -> AutomationSetting {
        match self {
            ConfigKey::InactiveDaysThreshold => {
                AutomationSetting::InactiveDaysThreshold(DEFAULT_INACTIVE_DAYS_THRESHOLD)
            }
            ConfigKey::CheckFrequency => AutomationSetting::CheckFrequency(CheckFrequency::Daily),
            ConfigKey::AutomationEnabled => {
                AutomationSetting::AutomationEnabled(DEFAULT_AUTOMATION_ENABLED)
            }
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::Config(format!("Unknown configuration key: {}", s)))
    }
}

/// How often the external scheduler should fire the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckFrequency {
    #[serde(rename = "daily", alias = "24h")]
    Daily,
    #[serde(rename = "twice-daily")]
    TwiceDaily,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "every-6h")]
    Every6h,
    #[serde(rename = "every-12h")]
    Every12h,
}

impl CheckFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            CheckFrequency::Daily => "daily",
            CheckFrequency::TwiceDaily => "twice-daily",
            CheckFrequency::Weekly => "weekly",
            CheckFrequency::Every6h => "every-6h",
            CheckFrequency::Every12h => "every-12h",
        }
    }

    /// Five-field cron expression handed to the scheduler.
    pub fn cron(&self) -> &'static str {
        match self {
            CheckFrequency::Daily => "0 9 * * *",
            CheckFrequency::TwiceDaily => "0 9,18 * * *",
            CheckFrequency::Weekly => "0 9 * * 1",
            CheckFrequency::Every6h => "0 */6 * * *",
            CheckFrequency::Every12h => "0 */12 * * *",
        }
    }
}

impl FromStr for CheckFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(JsonValue::from(s.trim()))
            .map_err(|_| Error::Config(format!("Unknown check frequency: {}", s)))
    }
}

/// One typed configuration value. Each key has exactly one payload type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationSetting {
    InactiveDaysThreshold(u32),
    CheckFrequency(CheckFrequency),
    AutomationEnabled(bool),
}

impl AutomationSetting {
    pub fn key(&self) -> ConfigKey {
        match self {
            AutomationSetting::InactiveDaysThreshold(_) => ConfigKey::InactiveDaysThreshold,
            AutomationSetting::CheckFrequency(_) => ConfigKey::CheckFrequency,
            AutomationSetting::AutomationEnabled(_) => ConfigKey::AutomationEnabled,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            AutomationSetting::InactiveDaysThreshold(days) => JsonValue::from(*days),
            AutomationSetting::CheckFrequency(freq) => JsonValue::from(freq.label()),
            AutomationSetting::AutomationEnabled(enabled) => JsonValue::from(*enabled),
        }
    }

    /// Decodes a stored JSON value for `key`, rejecting values of the wrong shape.
    pub fn from_json(key: ConfigKey, value: &JsonValue) -> Result<Self, Error> {
        let mismatch = || Error::Config(format!("Invalid value for {}: {}", key, value));
        match key {
            ConfigKey::InactiveDaysThreshold => {
                let days = value
                    .as_u64()
                    .filter(|d| *d > 0)
                    .and_then(|d| u32::try_from(d).ok())
                    .ok_or_else(mismatch)?;
                Ok(AutomationSetting::InactiveDaysThreshold(days))
            }
            ConfigKey::CheckFrequency => {
                let freq: CheckFrequency =
                    serde_json::from_value(value.clone()).map_err(|_| mismatch())?;
                Ok(AutomationSetting::CheckFrequency(freq))
            }
            ConfigKey::AutomationEnabled => {
                let enabled = value.as_bool().ok_or_else(mismatch)?;
                Ok(AutomationSetting::AutomationEnabled(enabled))
            }
        }
    }
}

/// A configuration row as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntry {
    pub key: String,
    pub value: JsonValue,
    pub description: Option<String>,
    pub updated_at: i64,
}

/// The full typed view of the store. Absent keys stay `None` and are omitted on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive_days_threshold: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_frequency: Option<CheckFrequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_enabled: Option<bool>,
}

impl AutomationSettings {
    pub fn insert(&mut self, setting: AutomationSetting) {
        match setting {
            AutomationSetting::InactiveDaysThreshold(d) => self.inactive_days_threshold = Some(d),
            AutomationSetting::CheckFrequency(f) => self.check_frequency = Some(f),
            AutomationSetting::AutomationEnabled(e) => self.automation_enabled = Some(e),
        }
    }

    pub fn threshold_or_default(&self) -> u32 {
        self.inactive_days_threshold
            .unwrap_or(DEFAULT_INACTIVE_DAYS_THRESHOLD)
    }

    pub fn enabled_or_default(&self) -> bool {
        self.automation_enabled.unwrap_or(DEFAULT_AUTOMATION_ENABLED)
    }
}
