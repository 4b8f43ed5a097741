//! Settings — process-wide preferences, loaded once and persisted on change.

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};

const REFRESH_INTERVAL_MIN: u64 = 5;
const REFRESH_INTERVAL_MAX: u64 = 86_400;

/// UI color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run device discovery when the process starts.
    pub discover_on_startup: bool,
    /// Seconds between background state polls.
    pub refresh_interval_secs: u64,
    /// UI theme preference.
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            discover_on_startup: true,
            refresh_interval_secs: 60,
            theme: Theme::System,
        }
    }
}

impl Settings {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] when the refresh interval is
    /// shorter than 5 seconds or longer than a day.
    pub fn validate(&self) -> Result<(), LumenError> {
        if !(REFRESH_INTERVAL_MIN..=REFRESH_INTERVAL_MAX).contains(&self.refresh_interval_secs) {
            return Err(ValidationError::OutOfRange {
                field: "refresh_interval_secs",
                value: i64::try_from(self.refresh_interval_secs).unwrap_or(i64::MAX),
                min: 5,
                max: 86_400,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_discovery_on_and_minute_refresh() {
        let settings = Settings::default();
        assert!(settings.discover_on_startup);
        assert_eq!(settings.refresh_interval_secs, 60);
        assert_eq!(settings.theme, Theme::System);
    }

    #[test]
    fn should_accept_default_settings() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn should_reject_refresh_interval_below_minimum() {
        let settings = Settings {
            refresh_interval_secs: 1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn should_reject_refresh_interval_above_one_day() {
        let settings = Settings {
            refresh_interval_secs: 90_000,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn should_deserialize_missing_fields_as_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.refresh_interval_secs, 60);
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let settings = Settings {
            discover_on_startup: false,
            refresh_interval_secs: 120,
            theme: Theme::Light,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
