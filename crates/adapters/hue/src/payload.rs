//! Wire payloads for the Hue bridge REST API.

use serde::{Deserialize, Serialize};

/// One light as reported by `GET /api/<username>/lights`.
#[derive(Debug, Deserialize)]
pub struct HueLight {
    pub name: String,
    pub state: HueLightState,
    pub modelid: Option<String>,
    pub manufacturername: Option<String>,
    pub uniqueid: Option<String>,
}

/// The `state` object of a Hue light.
///
/// `bri` and `sat` are 1–254 resp. 0–254, `hue` is 0–65535, `ct` is in
/// mireds. Fields are absent on bulbs that lack the capability.
#[derive(Debug, Deserialize)]
pub struct HueLightState {
    pub on: bool,
    pub bri: Option<u8>,
    pub hue: Option<u16>,
    pub sat: Option<u8>,
    pub ct: Option<u16>,
    pub reachable: bool,
}

/// Body for `PUT /api/<username>/lights/<id>/state`.
#[derive(Debug, Default, Serialize)]
pub struct HueStateCommand {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hue: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sat: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ct: Option<u16>,
}

/// One record from the Philips bridge discovery service.
#[derive(Debug, Deserialize)]
pub struct BridgeRecord {
    #[serde(default)]
    pub id: String,
    pub internalipaddress: String,
}

/// Bridge metadata from `GET /api/<username>/config`.
#[derive(Debug, Deserialize)]
pub struct BridgeConfig {
    pub name: Option<String>,
    pub bridgeid: Option<String>,
}
