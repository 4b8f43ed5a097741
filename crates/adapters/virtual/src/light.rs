//! A simulated light — holds its state in memory and always answers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use lumen_app::ports::protocol::DiscoveredLight;
use lumen_domain::light::{LightState, Protocol, StateChange};
use lumen_domain::time::now;

/// One simulated bulb.
pub struct SimulatedLight {
    unique_id: String,
    name: String,
    model: String,
    state: Mutex<LightState>,
}

impl SimulatedLight {
    /// Create a simulated bulb with the given identity and initial state.
    #[must_use]
    pub fn new(unique_id: &str, name: &str, model: &str, state: LightState) -> Self {
        Self {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            model: model.to_string(),
            state: Mutex::new(state),
        }
    }

    /// The vendor handle of this bulb.
    #[must_use]
    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    /// Produce the discovery record for this bulb.
    #[must_use]
    pub fn discover(&self) -> DiscoveredLight {
        DiscoveredLight {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            protocol: Protocol::Virtual,
            model: Some(self.model.clone()),
            manufacturer: Some("lumen".to_string()),
            address: None,
            bridge_id: None,
            state: self.snapshot(),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> LightState {
        self.lock().clone()
    }

    /// Apply a change and return the resulting state.
    pub fn apply(&self, change: &StateChange) -> LightState {
        let mut state = self.lock();
        state.apply(change, now());
        state.clone()
    }

    fn lock(&self) -> MutexGuard<'_, LightState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulb() -> SimulatedLight {
        SimulatedLight::new("virtual-1", "Demo Lamp", "VL-100", LightState::default())
    }

    #[test]
    fn should_start_with_given_state() {
        let light = bulb();
        let state = light.snapshot();
        assert!(!state.on);
        assert!(state.reachable);
    }

    #[test]
    fn should_apply_change_and_keep_it() {
        let light = bulb();
        let applied = light.apply(&StateChange {
            on: Some(true),
            brightness: Some(42),
            ..StateChange::default()
        });

        assert!(applied.on);
        assert_eq!(applied.brightness, 42);
        assert_eq!(light.snapshot().brightness, 42);
    }

    #[test]
    fn should_produce_discovery_record_with_current_state() {
        let light = bulb();
        light.apply(&StateChange::power(true));

        let discovered = light.discover();
        assert_eq!(discovered.unique_id, "virtual-1");
        assert_eq!(discovered.protocol, Protocol::Virtual);
        assert!(discovered.state.on);
    }
}
