//! Light — one record per bulb, unified across vendor protocols.
//!
//! Lights are created by discovery (or by hand for virtual bulbs) and
//! mutated by poll results and user commands. The vendor side is reduced
//! to a [`Protocol`] tag plus the `unique_id` handle the adapter uses to
//! address the device.

mod change;
mod protocol;
mod state;

pub use change::StateChange;
pub use protocol::Protocol;
pub use state::LightState;

use serde::{Deserialize, Serialize};

use crate::error::{LumenError, ValidationError};
use crate::id::LightId;
use crate::time::Timestamp;

/// A smart light known to the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Light {
    pub id: LightId,
    /// Vendor-stable handle the adapter addresses the device by
    /// (Hue bridge light number, LIFX serial, …).
    pub unique_id: String,
    pub name: String,
    pub protocol: Protocol,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    /// IP or host the device (or its bridge) answers on.
    pub address: Option<String>,
    /// Identifier of the mediating bridge, when there is one.
    pub bridge_id: Option<String>,
    pub state: LightState,
    pub created_at: Timestamp,
}

impl Light {
    /// Create a builder for constructing a [`Light`].
    #[must_use]
    pub fn builder() -> LightBuilder {
        LightBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `unique_id` is empty ([`ValidationError::EmptyUniqueId`])
    pub fn validate(&self) -> Result<(), LumenError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.unique_id.is_empty() {
            return Err(ValidationError::EmptyUniqueId.into());
        }
        Ok(())
    }

    /// Replace the state snapshot, stamping it with `at`.
    pub fn update_state(&mut self, state: LightState, at: Timestamp) {
        self.state = state;
        self.state.updated_at = at;
    }

    /// Mark the light unreachable, keeping the rest of the snapshot.
    pub fn mark_unreachable(&mut self, at: Timestamp) {
        self.state.reachable = false;
        self.state.updated_at = at;
    }
}

/// Step-by-step builder for [`Light`].
#[derive(Debug, Default)]
pub struct LightBuilder {
    id: Option<LightId>,
    unique_id: Option<String>,
    name: Option<String>,
    protocol: Option<Protocol>,
    model: Option<String>,
    manufacturer: Option<String>,
    address: Option<String>,
    bridge_id: Option<String>,
    state: Option<LightState>,
}

impl LightBuilder {
    #[must_use]
    pub fn id(mut self, id: LightId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    #[must_use]
    pub fn manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn bridge_id(mut self, bridge_id: impl Into<String>) -> Self {
        self.bridge_id = Some(bridge_id.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: LightState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Light`].
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] if required fields are missing or empty.
    pub fn build(self) -> Result<Light, LumenError> {
        let light = Light {
            id: self.id.unwrap_or_default(),
            unique_id: self.unique_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            protocol: self.protocol.unwrap_or(Protocol::Virtual),
            model: self.model,
            manufacturer: self.manufacturer,
            address: self.address,
            bridge_id: self.bridge_id,
            state: self.state.unwrap_or_default(),
            created_at: crate::time::now(),
        };
        light.validate()?;
        Ok(light)
    }
}
