//! State change — a partial patch applied to a light by commands and schedules.

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};

/// Bounds for [`StateChange::validate`]. Color temperature is in Kelvin.
const BRIGHTNESS_MAX: u8 = 100;
const HUE_MAX: u16 = 360;
const SATURATION_MAX: u8 = 100;
const COLOR_TEMP_MIN: u16 = 1500;
const COLOR_TEMP_MAX: u16 = 9000;

/// A partial state patch. Absent fields leave the light untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateChange {
    pub on: Option<bool>,
    pub brightness: Option<u8>,
    pub color_temp: Option<u16>,
    pub hue: Option<u16>,
    pub saturation: Option<u8>,
}

impl StateChange {
    /// A change that only switches power.
    #[must_use]
    pub fn power(on: bool) -> Self {
        Self {
            on: Some(on),
            ..Self::default()
        }
    }

    /// Whether the change carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.on.is_none()
            && self.brightness.is_none()
            && self.color_temp.is_none()
            && self.hue.is_none()
            && self.saturation.is_none()
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] naming the offending field
    /// when brightness exceeds 100, hue exceeds 360, saturation exceeds 100,
    /// or color temperature falls outside 1500–9000 K.
    pub fn validate(&self) -> Result<(), LumenError> {
        if let Some(brightness) = self.brightness
            && brightness > BRIGHTNESS_MAX
        {
            return Err(ValidationError::OutOfRange {
                field: "brightness",
                value: i64::from(brightness),
                min: 0,
                max: i64::from(BRIGHTNESS_MAX),
            }
            .into());
        }
        if let Some(hue) = self.hue
            && hue > HUE_MAX
        {
            return Err(ValidationError::OutOfRange {
                field: "hue",
                value: i64::from(hue),
                min: 0,
                max: i64::from(HUE_MAX),
            }
            .into());
        }
        if let Some(saturation) = self.saturation
            && saturation > SATURATION_MAX
        {
            return Err(ValidationError::OutOfRange {
                field: "saturation",
                value: i64::from(saturation),
                min: 0,
                max: i64::from(SATURATION_MAX),
            }
            .into());
        }
        if let Some(color_temp) = self.color_temp
            && !(COLOR_TEMP_MIN..=COLOR_TEMP_MAX).contains(&color_temp)
        {
            return Err(ValidationError::OutOfRange {
                field: "color_temp",
                value: i64::from(color_temp),
                min: i64::from(COLOR_TEMP_MIN),
                max: i64::from(COLOR_TEMP_MAX),
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
    fn should_accept_change_within_all_ranges() {
        let change = StateChange {
            on: Some(true),
            brightness: Some(100),
            color_temp: Some(3500),
            hue: Some(360),
            saturation: Some(100),
        };
        assert!(change.validate().is_ok());
    }

    #[test]
    fn should_reject_brightness_above_100() {
        let change = StateChange {
            brightness: Some(101),
            ..StateChange::default()
        };
        assert!(matches!(
            change.validate(),
            Err(LumenError::Validation(ValidationError::OutOfRange {
                field: "brightness",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_hue_above_360() {
        let change = StateChange {
            hue: Some(361),
            ..StateChange::default()
        };
        assert!(matches!(
            change.validate(),
            Err(LumenError::Validation(ValidationError::OutOfRange {
                field: "hue",
                ..
            }))
        ));
    }

    #[test]
    fn should_reject_saturation_above_100() {
        let change = StateChange {
            saturation: Some(150),
            ..StateChange::default()
        };
        assert!(change.validate().is_err());
    }

    #[test]
    fn should_reject_color_temp_outside_kelvin_range() {
        for kelvin in [1000, 9500] {
            let change = StateChange {
                color_temp: Some(kelvin),
                ..StateChange::default()
            };
            assert!(change.validate().is_err(), "expected {kelvin} K rejected");
        }
    }

    #[test]
    fn should_accept_empty_change() {
        assert!(StateChange::default().validate().is_ok());
        assert!(StateChange::default().is_empty());
    }

    #[test]
    fn should_build_power_only_change() {
        let change = StateChange::power(true);
        assert_eq!(change.on, Some(true));
        assert!(change.brightness.is_none());
        assert!(!change.is_empty());
    }

    #[test]
    fn should_deserialize_missing_fields_as_none() {
        let change: StateChange = serde_json::from_str(r#"{"on": false}"#).unwrap();
        assert_eq!(change.on, Some(false));
        assert!(change.brightness.is_none());
        assert!(change.hue.is_none());
    }
}
