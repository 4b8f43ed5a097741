//! # lumen-adapter-lifx
//!
//! LIFX protocol adapter over the LIFX HTTP API (`/v1/lights/...`,
//! bearer-token auth). Bulbs are addressed by serial (`id:<serial>`
//! selectors); reachability comes from the API's `connected` flag.
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod config;
mod payload;

pub use config::LifxConfig;
pub use payload::{LifxCommandResponse, LifxLight, LifxStateCommand};

use std::time::Duration;

use lumen_app::ports::protocol::{DiscoveredLight, ProtocolAdapter};
use lumen_domain::error::{DeviceError, LumenError};
use lumen_domain::light::{Light, LightState, Protocol, StateChange};

/// Protocol adapter for the LIFX HTTP API.
pub struct LifxAdapter {
    client: reqwest::Client,
    config: LifxConfig,
}

impl LifxAdapter {
    /// Build an adapter for the configured account.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Api`] when the HTTP client cannot be built.
    pub fn new(config: LifxConfig) -> Result<Self, LumenError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| DeviceError::Api(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/{tail}", self.config.base_url)
    }

    async fn list_lights(&self, selector: &str) -> Result<Vec<LifxLight>, LumenError> {
        let response = self
            .client
            .get(self.url(&format!("lights/{selector}")))
            .bearer_auth(&self.config.token)
            .send()
            .await
            .map_err(|err| DeviceError::Unreachable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DeviceError::Api(format!("api answered {}", response.status())).into());
        }
        response
            .json()
            .await
            .map_err(|err| DeviceError::Api(err.to_string()).into())
    }

    async fn fetch_one(&self, light: &Light) -> Result<LifxLight, LumenError> {
        let selector = format!("id:{}", light.unique_id);
        self.list_lights(&selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DeviceError::Unreachable(format!("light {} not known to the api", light.unique_id))
                    .into()
            })
    }
}

impl ProtocolAdapter for LifxAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Lifx
    }

    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        let lights = self.list_lights("all").await?;
        tracing::debug!(count = lights.len(), "lifx api listed lights");
        Ok(lights
            .into_iter()
            .map(|light| {
                let state = light.to_state();
                DiscoveredLight {
                    unique_id: light.id,
                    name: light.label,
                    protocol: Protocol::Lifx,
                    model: light.product.as_ref().and_then(|p| p.name.clone()),
                    manufacturer: light.product.as_ref().and_then(|p| p.company.clone()),
                    address: None,
                    bridge_id: None,
                    state,
                }
            })
            .collect())
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        Ok(self.fetch_one(light).await?.to_state())
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        let command = LifxStateCommand::from_change(change);
        let response = self
            .client
            .put(self.url(&format!("lights/id:{}/state", light.unique_id)))
            .bearer_auth(&self.config.token)
            .json(&command)
            .send()
            .await
            .map_err(|err| DeviceError::Unreachable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(DeviceError::Api(format!("api answered {}", response.status())).into());
        }
        let body: LifxCommandResponse = response
            .json()
            .await
            .map_err(|err| DeviceError::Api(err.to_string()))?;
        ensure_command_accepted(&body)?;

        self.fetch_state(light).await
    }
}

/// Check a multi-status command response for per-light failures.
fn ensure_command_accepted(response: &LifxCommandResponse) -> Result<(), LumenError> {
    for result in &response.results {
        if result.status != "ok" {
            return Err(
                DeviceError::Unreachable(format!("light {} is {}", result.id, result.status))
                    .into(),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(statuses: &[(&str, &str)]) -> LifxCommandResponse {
        let results = statuses
            .iter()
            .map(|(id, status)| {
                serde_json::json!({"id": id, "status": status})
            })
            .collect::<Vec<_>>();
        serde_json::from_value(serde_json::json!({ "results": results })).unwrap()
    }

    #[test]
    fn should_accept_all_ok_response() {
        assert!(ensure_command_accepted(&response(&[("a", "ok"), ("b", "ok")])).is_ok());
    }

    #[test]
    fn should_reject_offline_light() {
        let result = ensure_command_accepted(&response(&[("a", "offline")]));
        assert!(matches!(
            result,
            Err(LumenError::Device(DeviceError::Unreachable(message)))
                if message.contains("offline")
        ));
    }

    #[test]
    fn should_reject_timed_out_light() {
        let result = ensure_command_accepted(&response(&[("a", "ok"), ("b", "timed_out")]));
        assert!(result.is_err());
    }

    #[test]
    fn should_build_urls_from_configured_base() {
        let adapter = LifxAdapter::new(LifxConfig {
            token: "t".to_string(),
            base_url: "http://localhost:9000/v1".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            adapter.url("lights/all"),
            "http://localhost:9000/v1/lights/all"
        );
    }

    #[test]
    fn should_report_lifx_protocol() {
        let adapter = LifxAdapter::new(LifxConfig {
            token: "t".to_string(),
            base_url: "https://api.lifx.com/v1".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(adapter.protocol(), Protocol::Lifx);
    }
}
