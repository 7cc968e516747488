//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Recovery start instant and daily spend (drives clean time and money saved)
//! - Notification toggle and daily reminder time
//!
//! Configuration is stored at `~/.config/cleantime/config.toml`.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::timer::{self, CleanTime, DEFAULT_RATE_PER_DAY};

/// Clean-time counter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// When the user's clean time began.
    #[serde(default = "Utc::now")]
    pub start: DateTime<Utc>,
    /// Currency units not spent per clean day.
    #[serde(default = "default_rate_per_day")]
    pub rate_per_day: u64,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Daily reminder, `HH:MM` local time.
    #[serde(default = "default_reminder_time")]
    pub reminder_time: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/cleantime/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_rate_per_day() -> u64 {
    DEFAULT_RATE_PER_DAY
}
fn default_true() -> bool {
    true
}
fn default_reminder_time() -> String {
    "20:00".into()
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            start: Utc::now(),
            rate_per_day: default_rate_per_day(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reminder_time: default_reminder_time(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recovery: RecoveryConfig::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                debug!(path = %path.display(), "config loaded");
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                info!(path = %path.display(), "default config written");
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, validated against `now`.
    /// Nothing changes when the key is unknown or the value is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// or fails validation.
    pub fn set(&mut self, key: &str, value: &str, now: DateTime<Utc>) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate(now).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// The start may not lie in the future and the reminder must be `HH:MM`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.recovery.start > now {
            return Err(ValidationError::StartInFuture {
                start: self.recovery.start,
            });
        }
        NaiveTime::parse_from_str(&self.notifications.reminder_time, "%H:%M").map_err(|e| {
            ValidationError::InvalidValue {
                field: "notifications.reminder_time".into(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Restart the clean-time counter at `now` with the default daily rate.
    pub fn reset_progress(&mut self, now: DateTime<Utc>) {
        self.recovery.start = now;
        self.recovery.rate_per_day = default_rate_per_day();
    }

    /// Clean time as of `now`.
    pub fn clean_time(&self, now: DateTime<Utc>) -> CleanTime {
        timer::compute(self.recovery.start, now, self.recovery.rate_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn sample() -> Config {
        let mut cfg = Config::default();
        cfg.recovery.start = now() - Duration::days(5);
        cfg
    }

    #[test]
    fn default_config_roundtrip() {
        let cfg = sample();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.recovery.rate_per_day, 50);
        assert_eq!(parsed.notifications.reminder_time, "20:00");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[recovery]\nrate_per_day = 80\n").unwrap();
        assert_eq!(parsed.recovery.rate_per_day, 80);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = sample();
        assert_eq!(cfg.get("recovery.rate_per_day").as_deref(), Some("50"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert_eq!(cfg.get("notifications.reminder_time").as_deref(), Some("20:00"));
        assert!(cfg.get("recovery").is_none());
        assert!(cfg.get("recovery.missing_key").is_none());
    }

    #[test]
    fn set_updates_typed_values() {
        let mut cfg = sample();
        cfg.set("recovery.rate_per_day", "75", now()).unwrap();
        cfg.set("notifications.enabled", "false", now()).unwrap();
        cfg.set("notifications.reminder_time", "07:30", now()).unwrap();
        cfg.set("recovery.start", "2024-06-01T08:00:00Z", now()).unwrap();

        assert_eq!(cfg.recovery.rate_per_day, 75);
        assert!(!cfg.notifications.enabled);
        assert_eq!(cfg.notifications.reminder_time, "07:30");
        assert_eq!(cfg.recovery.start, Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = sample();
        assert!(matches!(
            cfg.set("recovery.nonexistent_key", "1", now()),
            Err(ConfigError::UnknownKey(_))
        ));
        assert!(matches!(cfg.set("", "1", now()), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(cfg.set("recovery", "1", now()), Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn set_rejects_invalid_values_without_mutating() {
        let mut cfg = sample();
        let before = cfg.clone();
        assert!(cfg.set("notifications.enabled", "not_a_bool", now()).is_err());
        assert!(cfg.set("recovery.rate_per_day", "-5", now()).is_err());
        assert!(cfg.set("recovery.start", "yesterday", now()).is_err());
        assert!(cfg.set("notifications.reminder_time", "25:99", now()).is_err());
        assert_eq!(cfg, before);
    }

    #[test]
    fn future_start_is_rejected() {
        let mut cfg = sample();
        let err = cfg
            .set("recovery.start", "2030-01-01T00:00:00Z", now())
            .unwrap_err();
        assert!(err.to_string().contains("in the future"));
    }

    #[test]
    fn clean_time_uses_configured_rate() {
        let mut cfg = sample();
        cfg.recovery.rate_per_day = 30;
        let t = cfg.clean_time(now());
        assert_eq!(t.days, 5);
        assert_eq!(t.amount_accrued, 150);
    }

    #[test]
    fn reset_progress_restarts_counter() {
        let mut cfg = sample();
        cfg.recovery.rate_per_day = 120;
        cfg.reset_progress(now());
        assert_eq!(cfg.recovery.start, now());
        assert_eq!(cfg.recovery.rate_per_day, 50);
        assert_eq!(cfg.clean_time(now()), CleanTime::default());
    }

    #[test]
    fn load_from_writes_defaults_then_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let first = Config::load_from(&path).unwrap();
        assert!(path.exists());

        let mut changed = first.clone();
        changed.recovery.rate_per_day = 99;
        changed.save_to(&path).unwrap();

        let second = Config::load_from(&path).unwrap();
        assert_eq!(second.recovery.rate_per_day, 99);
        assert_eq!(second.recovery.start, first.recovery.start);
    }

    #[test]
    fn unparsable_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "recovery = [").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
