//! Wire payloads for the LIFX HTTP API.

use serde::{Deserialize, Serialize};

use lumen_domain::light::{LightState, StateChange};

/// One light as reported by `GET /lights/<selector>`.
#[derive(Debug, Deserialize)]
pub struct LifxLight {
    /// Serial number, stable per bulb.
    pub id: String,
    pub label: String,
    pub connected: bool,
    /// `"on"` or `"off"`.
    pub power: String,
    /// 0.0–1.0.
    pub brightness: f64,
    pub color: LifxColor,
    pub product: Option<LifxProduct>,
}

/// HSBK color as reported by the API.
#[derive(Debug, Deserialize)]
pub struct LifxColor {
    /// Degrees, 0–360.
    pub hue: f64,
    /// 0.0–1.0.
    pub saturation: f64,
    pub kelvin: u16,
}

/// Product metadata attached to a light.
#[derive(Debug, Deserialize)]
pub struct LifxProduct {
    pub name: Option<String>,
    pub company: Option<String>,
}

/// Body for `PUT /lights/<selector>/state`.
#[derive(Debug, Default, Serialize)]
pub struct LifxStateCommand {
    /// `"on"` or `"off"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,

    /// 0.0–1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,

    /// Color string, e.g. `"hue:120 saturation:0.5 kelvin:3500"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// The multi-status answer to a state command.
#[derive(Debug, Deserialize)]
pub struct LifxCommandResponse {
    pub results: Vec<LifxCommandResult>,
}

/// Per-light outcome inside a [`LifxCommandResponse`].
#[derive(Debug, Deserialize)]
pub struct LifxCommandResult {
    pub id: String,
    /// `"ok"`, `"offline"`, or `"timed_out"`.
    pub status: String,
}

impl LifxStateCommand {
    /// Translate a unified state change into an API command.
    ///
    /// Color components share one selector string in this API, so hue,
    /// saturation, and Kelvin are folded together.
    #[must_use]
    pub fn from_change(change: &StateChange) -> Self {
        let mut color_parts = Vec::new();
        if let Some(hue) = change.hue {
            color_parts.push(format!("hue:{hue}"));
        }
        if let Some(saturation) = change.saturation {
            color_parts.push(format!("saturation:{}", f64::from(saturation) / 100.0));
        }
        if let Some(kelvin) = change.color_temp {
            color_parts.push(format!("kelvin:{kelvin}"));
        }

        Self {
            power: change.on.map(|on| (if on { "on" } else { "off" }).to_string()),
            brightness: change.brightness.map(|pct| f64::from(pct) / 100.0),
            color: if color_parts.is_empty() {
                None
            } else {
                Some(color_parts.join(" "))
            },
        }
    }
}

impl LifxLight {
    /// Translate an API light report into the unified model.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_state(&self) -> LightState {
        LightState {
            on: self.power == "on",
            brightness: (self.brightness * 100.0).round().clamp(0.0, 100.0) as u8,
            color_temp: Some(self.color.kelvin),
            hue: Some(self.color.hue.round().clamp(0.0, 360.0) as u16),
            saturation: Some((self.color.saturation * 100.0).round().clamp(0.0, 100.0) as u8),
            reachable: self.connected,
            updated_at: lumen_domain::time::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_light_json() -> &'static str {
        r#"{
            "id": "d073d5f1f9e2",
            "uuid": "02d5f1f9-...",
            "label": "Living Room",
            "connected": true,
            "power": "on",
            "color": {"hue": 120.0, "saturation": 0.5, "kelvin": 3500},
            "brightness": 0.8,
            "product": {
                "name": "LIFX Color 1000",
                "identifier": "lifx_color_1000",
                "company": "LIFX"
            }
        }"#
    }

    #[test]
    fn should_deserialize_light_from_api_json() {
        let light: LifxLight = serde_json::from_str(sample_light_json()).unwrap();
        assert_eq!(light.id, "d073d5f1f9e2");
        assert_eq!(light.label, "Living Room");
        assert!(light.connected);
        assert_eq!(light.color.kelvin, 3500);
    }

    #[test]
    fn should_translate_light_report_into_unified_state() {
        let light: LifxLight = serde_json::from_str(sample_light_json()).unwrap();
        let state = light.to_state();
        assert!(state.on);
        assert_eq!(state.brightness, 80);
        assert_eq!(state.hue, Some(120));
        assert_eq!(state.saturation, Some(50));
        assert_eq!(state.color_temp, Some(3500));
        assert!(state.reachable);
    }

    #[test]
    fn should_report_disconnected_light_as_unreachable() {
        let json = r#"{
            "id": "d073d5f1f9e3",
            "label": "Bedroom",
            "connected": false,
            "power": "off",
            "color": {"hue": 0.0, "saturation": 0.0, "kelvin": 2700},
            "brightness": 0.5
        }"#;
        let light: LifxLight = serde_json::from_str(json).unwrap();
        let state = light.to_state();
        assert!(!state.on);
        assert!(!state.reachable);
    }

    #[test]
    fn should_build_power_only_command() {
        let command = LifxStateCommand::from_change(&StateChange::power(true));
        assert_eq!(command.power.as_deref(), Some("on"));
        assert!(command.brightness.is_none());
        assert!(command.color.is_none());
    }

    #[test]
    fn should_fold_color_components_into_one_string() {
        let change = StateChange {
            hue: Some(120),
            saturation: Some(50),
            color_temp: Some(3500),
            ..StateChange::default()
        };
        let command = LifxStateCommand::from_change(&change);
        assert_eq!(
            command.color.as_deref(),
            Some("hue:120 saturation:0.5 kelvin:3500")
        );
    }

    #[test]
    fn should_scale_brightness_to_unit_interval() {
        let change = StateChange {
            brightness: Some(40),
            ..StateChange::default()
        };
        let command = LifxStateCommand::from_change(&change);
        assert!((command.brightness.unwrap() - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn should_serialize_command_without_absent_fields() {
        let command = LifxStateCommand::from_change(&StateChange::power(false));
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json, serde_json::json!({"power": "off"}));
    }

    #[test]
    fn should_deserialize_multi_status_response() {
        let json = r#"{"results": [{"id": "d073d5f1f9e2", "status": "ok", "label": "x"}]}"#;
        let response: LifxCommandResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].status, "ok");
    }
}
