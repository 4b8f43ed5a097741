//! Light state — the last known operational state of a bulb.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

use super::StateChange;

/// Snapshot of a light's state, refreshed by polls and commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Whether the light is on.
    pub on: bool,
    /// Brightness in percent, 0–100.
    pub brightness: u8,
    /// Color temperature in Kelvin, when the bulb supports it.
    pub color_temp: Option<u16>,
    /// Hue in degrees, 0–360, for color bulbs.
    pub hue: Option<u16>,
    /// Saturation in percent, 0–100, for color bulbs.
    pub saturation: Option<u8>,
    /// Whether the last poll or command reached the device.
    pub reachable: bool,
    /// When this snapshot was taken.
    pub updated_at: Timestamp,
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: 100,
            color_temp: None,
            hue: None,
            saturation: None,
            reachable: true,
            updated_at: crate::time::now(),
        }
    }
}

impl LightState {
    /// Apply a partial change on top of this snapshot.
    ///
    /// The change is assumed validated; only present fields are overwritten.
    pub fn apply(&mut self, change: &StateChange, at: Timestamp) {
        if let Some(on) = change.on {
            self.on = on;
        }
        if let Some(brightness) = change.brightness {
            self.brightness = brightness;
        }
        if let Some(color_temp) = change.color_temp {
            self.color_temp = Some(color_temp);
        }
        if let Some(hue) = change.hue {
            self.hue = Some(hue);
        }
        if let Some(saturation) = change.saturation {
            self.saturation = Some(saturation);
        }
        self.updated_at = at;
    }
}
