use booking_core::{
    ValidationPolicy, DEFAULT_NOTIFICATION_DURATION_MS, MAX_NOTIFICATION_DURATION_MS,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::ConfigError;

/// Keys accepted by [`Config::set`], in display order.
pub const SETTABLE_KEYS: &[&str] = &[
    "locale",
    "notification_duration_ms",
    "validation_policy",
    "data_root",
    "ui_color_enabled",
    "plain_output",
    "high_contrast",
];

/// Stores user-configurable booking preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    #[serde(default = "Config::default_notification_duration_ms")]
    pub notification_duration_ms: u64,
    #[serde(default)]
    pub validation_policy: ValidationPolicy,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_department: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where submitted appointments are stored. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            notification_duration_ms: Self::default_notification_duration_ms(),
            validation_policy: ValidationPolicy::default(),
            accessibility: AccessibilitySettings::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_opened_department: None,
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_notification_duration_ms() -> u64 {
        DEFAULT_NOTIFICATION_DURATION_MS
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    /// Value of a settable key rendered for display.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "locale" => self.locale.clone(),
            "notification_duration_ms" => self.notification_duration_ms.to_string(),
            "validation_policy" => self.validation_policy.to_string(),
            "data_root" => self
                .data_root
                .as_ref()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "(default)".into()),
            "ui_color_enabled" => self.ui_color_enabled.to_string(),
            "plain_output" => self.accessibility.plain_output.to_string(),
            "high_contrast" => self.accessibility.high_contrast.to_string(),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Parses and applies one `key value` pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "locale" => {
                if value.is_empty() {
                    return Err(invalid(key, value, "locale cannot be empty"));
                }
                self.locale = value.to_string();
            }
            "notification_duration_ms" => {
                let millis: u64 = value
                    .parse()
                    .map_err(|_| invalid(key, value, "expected a whole number of milliseconds"))?;
                if millis == 0 {
                    return Err(invalid(key, value, "duration must be positive"));
                }
                if millis > MAX_NOTIFICATION_DURATION_MS {
                    return Err(invalid(key, value, "duration cannot exceed one day (86400000 ms)"));
                }
                self.notification_duration_ms = millis;
            }
            "validation_policy" => {
                self.validation_policy = value
                    .parse()
                    .map_err(|_| invalid(key, value, "expected all-fields or required-only"))?;
            }
            "data_root" => {
                self.data_root = match value {
                    "" | "default" => None,
                    path => Some(PathBuf::from(path)),
                };
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "plain_output" => self.accessibility.plain_output = parse_bool(key, value)?,
            "high_contrast" => self.accessibility.high_contrast = parse_bool(key, value)?,
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Brings values read from disk back into the range `set` accepts.
    pub fn normalise(mut self) -> Self {
        let millis = self.notification_duration_ms;
        if millis == 0 || millis > MAX_NOTIFICATION_DURATION_MS {
            let fixed = if millis == 0 {
                Self::default_notification_duration_ms()
            } else {
                MAX_NOTIFICATION_DURATION_MS
            };
            warn!(stored = millis, using = fixed, "notification duration out of range");
            self.notification_duration_ms = fixed;
        }
        self
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}
