//! Unit conversions between the unified light model and Hue wire values.
//!
//! Hue brightness and saturation run 1–254 resp. 0–254, hue runs 0–65535,
//! and color temperature is in mireds (1,000,000 / Kelvin).

use lumen_domain::light::{LightState, StateChange};

use crate::payload::{HueLightState, HueStateCommand};

const HUE_BRI_MAX: u32 = 254;
const HUE_SAT_MAX: u32 = 254;
const HUE_HUE_MAX: u32 = 65_535;
const MIRED_MIN: u32 = 153;
const MIRED_MAX: u32 = 500;

/// Percent (0–100) to Hue brightness (1–254).
#[must_use]
pub fn pct_to_bri(pct: u8) -> u8 {
    let scaled = (u32::from(pct) * HUE_BRI_MAX + 50) / 100;
    u8::try_from(scaled.max(1)).unwrap_or(u8::MAX)
}

/// Hue brightness (1–254) to percent (0–100).
#[must_use]
pub fn bri_to_pct(bri: u8) -> u8 {
    let scaled = (u32::from(bri) * 100 + HUE_BRI_MAX / 2) / HUE_BRI_MAX;
    u8::try_from(scaled).unwrap_or(100)
}

/// Degrees (0–360) to the Hue 16-bit hue scale.
#[must_use]
pub fn deg_to_hue(deg: u16) -> u16 {
    let scaled = (u32::from(deg) * HUE_HUE_MAX + 180) / 360;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

/// The Hue 16-bit hue scale to degrees (0–360).
#[must_use]
pub fn hue_to_deg(hue: u16) -> u16 {
    let scaled = (u32::from(hue) * 360 + HUE_HUE_MAX / 2) / HUE_HUE_MAX;
    u16::try_from(scaled).unwrap_or(360)
}

/// Percent (0–100) to Hue saturation (0–254).
#[must_use]
pub fn pct_to_sat(pct: u8) -> u8 {
    let scaled = (u32::from(pct) * HUE_SAT_MAX + 50) / 100;
    u8::try_from(scaled).unwrap_or(u8::MAX)
}

/// Hue saturation (0–254) to percent (0–100).
#[must_use]
pub fn sat_to_pct(sat: u8) -> u8 {
    let scaled = (u32::from(sat) * 100 + HUE_SAT_MAX / 2) / HUE_SAT_MAX;
    u8::try_from(scaled).unwrap_or(100)
}

/// Kelvin to mireds, clamped to the bridge-accepted 153–500 range.
#[must_use]
pub fn kelvin_to_mired(kelvin: u16) -> u16 {
    let mired = (1_000_000_u32 / u32::from(kelvin.max(1))).clamp(MIRED_MIN, MIRED_MAX);
    u16::try_from(mired).unwrap_or(u16::MAX)
}

/// Mireds to Kelvin.
#[must_use]
pub fn mired_to_kelvin(mired: u16) -> u16 {
    let kelvin = 1_000_000_u32 / u32::from(mired.max(1));
    u16::try_from(kelvin).unwrap_or(u16::MAX)
}

/// Translate a unified state change into a bridge command.
#[must_use]
pub fn command_from_change(change: &StateChange) -> HueStateCommand {
    HueStateCommand {
        on: change.on,
        bri: change.brightness.map(pct_to_bri),
        hue: change.hue.map(deg_to_hue),
        sat: change.saturation.map(pct_to_sat),
        ct: change.color_temp.map(kelvin_to_mired),
    }
}

/// Translate a bridge state report into the unified model.
#[must_use]
pub fn state_from_hue(state: &HueLightState) -> LightState {
    LightState {
        on: state.on,
        brightness: state.bri.map_or(100, bri_to_pct),
        color_temp: state.ct.map(mired_to_kelvin),
        hue: state.hue.map(hue_to_deg),
        saturation: state.sat.map(sat_to_pct),
        reachable: state.reachable,
        updated_at: lumen_domain::time::now(),
    }
}
