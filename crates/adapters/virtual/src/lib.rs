//! # lumen-adapter-virtual
//!
//! Virtual/demo protocol adapter providing simulated lights for testing
//! and demonstration.
//!
//! ## Provided lights (default set)
//!
//! | Name | Unique id | Behaviour |
//! |------|-----------|-----------|
//! | Demo Lamp | `virtual-1` | Full color bulb, starts off |
//! | Demo Strip | `virtual-2` | Warm-white strip, starts on at 50 % |
//!
//! ## Dependency rule
//!
//! Depends on `lumen-app` (port traits) and `lumen-domain` only.

mod light;

pub use light::SimulatedLight;

use std::collections::HashMap;

use lumen_app::ports::protocol::{DiscoveredLight, ProtocolAdapter};
use lumen_domain::error::{DeviceError, LumenError};
use lumen_domain::light::{Light, LightState, Protocol, StateChange};

/// Protocol adapter over a set of in-memory simulated lights.
pub struct VirtualAdapter {
    lights: HashMap<String, SimulatedLight>,
}

impl Default for VirtualAdapter {
    fn default() -> Self {
        let lamp = SimulatedLight::new("virtual-1", "Demo Lamp", "VL-100", LightState::default());
        let strip = SimulatedLight::new(
            "virtual-2",
            "Demo Strip",
            "VS-200",
            LightState {
                on: true,
                brightness: 50,
                color_temp: Some(2700),
                ..LightState::default()
            },
        );
        Self::empty().with_light(lamp).with_light(strip)
    }
}

impl VirtualAdapter {
    /// An adapter with no lights at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lights: HashMap::new(),
        }
    }

    /// Add a simulated light.
    #[must_use]
    pub fn with_light(mut self, light: SimulatedLight) -> Self {
        self.lights.insert(light.unique_id().to_string(), light);
        self
    }

    fn lookup(&self, light: &Light) -> Result<&SimulatedLight, LumenError> {
        self.lights.get(&light.unique_id).ok_or_else(|| {
            DeviceError::Unreachable(format!("no simulated light {}", light.unique_id)).into()
        })
    }
}

impl ProtocolAdapter for VirtualAdapter {
    fn protocol(&self) -> Protocol {
        Protocol::Virtual
    }

    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        Ok(self.lights.values().map(SimulatedLight::discover).collect())
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        Ok(self.lookup(light)?.snapshot())
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        Ok(self.lookup(light)?.apply(change))
    }
}
