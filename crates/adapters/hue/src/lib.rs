//! # lumen-adapter-hue
//!
//! Philips Hue protocol adapter. Talks to one bridge over its REST API:
//! light enumeration via `GET /api/<username>/lights`, commands via
//! `PUT /api/<username>/lights/<id>/state`. Bridges themselves can be
//! located through the Philips discovery service ([`discover_bridges`]).
//!
//! The bridge addresses lights by their bridge-assigned number; that
//! number is what ends up in `Light::unique_id`.
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod config;
mod convert;
mod payload;

pub use config::HueConfig;
pub use payload::{BridgeRecord, HueLight, HueLightState, HueStateCommand};

use std::collections::HashMap;
use std::time::Duration;

use lumen_app::ports::protocol::{DiscoveredLight, ProtocolAdapter};
use lumen_domain::error::{DeviceError, LumenError};
use lumen_domain::light::{Light, LightState, Protocol, StateChange};

use payload::BridgeConfig;

const DISCOVERY_URL: &str = "https://discovery.meethue.com/";

/// Query the Philips discovery service for bridges on the local network.
///
/// # Errors
///
/// Returns [`DeviceError::Unreachable`] when the service cannot be
/// reached or answers with garbage.
pub async fn discover_bridges() -> Result<Vec<BridgeRecord>, LumenError> {
    let response = reqwest::get(DISCOVERY_URL)
        .await
        .map_err(|err| DeviceError::Unreachable(err.to_string()))?;
    response
        .json()
        .await
        .map_err(|err| DeviceError::Api(err.to_string()).into())
}

/// Protocol adapter for one Hue bridge.
pub struct HueAdapter {
    client: reqwest::Client,
    config: HueConfig,
}

impl HueAdapter {
    /// Build an adapter for the configured bridge.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Api`] when the HTTP client cannot be built.
    pub fn new(config: HueConfig) -> Result<Self, LumenError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DeviceError::Api(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, tail: &str) -> String {
        format!(
            "http://{}/api/{}/{tail}",
            self.config.host, self.config.username
        )
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, tail: &str) -> Result<T, LumenError> {
        let response = self
            .client
            .get(self.url(tail))
            .send()
            .await
            .map_err(|err| DeviceError::Unreachable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DeviceError::Api(format!("bridge answered {}", response.status())).into());
        }
        response
            .json()
            .await
            .map_err(|err| DeviceError::Api(err.to_string()).into())
    }

    async fn fetch_hue_light(&self, number: &str) -> Result<HueLight, LumenError> {
        self.get_json(&format!("lights/{number}")).await
    }
}

impl ProtocolAdapter for HueAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Hue
    }

    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        // Bridge metadata is nice to have; a failure here should not hide
        // the lights themselves.
        let bridge_id = match self.get_json::<BridgeConfig>("config").await {
            Ok(config) => config.bridgeid,
            Err(error) => {
                tracing::debug!(%error, "bridge config unavailable");
                None
            }
        };

        let lights: HashMap<String, HueLight> = self.get_json("lights").await?;
        let mut discovered: Vec<_> = lights
            .into_iter()
            .map(|(number, light)| DiscoveredLight {
                unique_id: number,
                name: light.name,
                protocol: Protocol::Hue,
                model: light.modelid,
                manufacturer: light.manufacturername,
                address: Some(self.config.host.clone()),
                bridge_id: bridge_id.clone(),
                state: convert::state_from_hue(&light.state),
            })
            .collect();
        // Bridge numbers are small integers; keep the listing stable.
        discovered.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        Ok(discovered)
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        let hue_light = self.fetch_hue_light(&light.unique_id).await?;
        Ok(convert::state_from_hue(&hue_light.state))
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        let command = convert::command_from_change(change);
        let response = self
            .client
            .put(self.url(&format!("lights/{}/state", light.unique_id)))
            .json(&command)
            .send()
            .await
            .map_err(|err| DeviceError::Unreachable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DeviceError::Api(format!("bridge answered {}", response.status())).into());
        }
        let body: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|err| DeviceError::Api(err.to_string()))?;
        ensure_command_accepted(&body)?;

        // The bridge echoes individual field updates; reading the light
        // back gives the authoritative combined state.
        self.fetch_state(light).await
    }
}

/// Check a bridge command response for embedded error records.
///
/// The bridge answers `200 OK` even on rejected commands and encodes the
/// failure as `[{"error": {...}}]` elements instead.
fn ensure_command_accepted(body: &[serde_json::Value]) -> Result<(), LumenError> {
    for entry in body {
        if let Some(error) = entry.get("error") {
            let description = error
                .get("description")
                .and_then(|d| d.as_str())
                .unwrap_or("unknown bridge error");
            return Err(DeviceError::Api(description.to_string()).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_success_response() {
        let body = vec![serde_json::json!({"success": {"/lights/1/state/on": true}})];
        assert!(ensure_command_accepted(&body).is_ok());
    }

    #[test]
    fn should_reject_response_with_error_record() {
        let body = vec![
            serde_json::json!({"success": {"/lights/1/state/on": true}}),
            serde_json::json!({"error": {
                "type": 201,
                "address": "/lights/1/state/bri",
                "description": "parameter, bri, is not modifiable"
            }}),
        ];
        let result = ensure_command_accepted(&body);
        assert!(matches!(
            result,
            Err(LumenError::Device(DeviceError::Api(message)))
                if message.contains("not modifiable")
        ));
    }

    #[test]
    fn should_accept_empty_response() {
        assert!(ensure_command_accepted(&[]).is_ok());
    }

    #[test]
    fn should_build_bridge_urls_from_config() {
        let adapter = HueAdapter::new(HueConfig {
            host: "192.168.1.2".to_string(),
            username: "key".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            adapter.url("lights/3/state"),
            "http://192.168.1.2/api/key/lights/3/state"
        );
    }

    #[test]
    fn should_report_hue_protocol() {
        let adapter = HueAdapter::new(HueConfig {
            host: "hue.local".to_string(),
            username: "key".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(adapter.protocol(), Protocol::Hue);
    }
}
