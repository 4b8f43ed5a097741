//! Protocol ports — vendor adapters and the routing gateway.
//!
//! A [`ProtocolAdapter`] bridges one vendor API (Hue bridge, LIFX HTTP,
//! virtual) into the unified light model. The [`LightGateway`] routes a
//! command to the adapter owning the light's protocol; the concrete
//! implementation is [`AdapterRegistry`](crate::registry::AdapterRegistry).

use std::future::Future;

use lumen_domain::error::LumenError;
use lumen_domain::light::{Light, LightState, Protocol, StateChange};

/// A light reported by an adapter's discovery pass.
///
/// Carries everything needed to create or refresh a [`Light`]; the
/// discovery service decides whether it is new or already known.
#[derive(Debug, Clone)]
pub struct DiscoveredLight {
    /// Vendor-stable handle within `protocol`.
    pub unique_id: String,
    pub name: String,
    pub protocol: Protocol,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub address: Option<String>,
    pub bridge_id: Option<String>,
    pub state: LightState,
}

impl DiscoveredLight {
    /// Materialise a fresh [`Light`] record from this discovery.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] when the vendor reported an empty
    /// name or unique id.
    pub fn into_light(self) -> Result<Light, LumenError> {
        let mut builder = Light::builder()
            .unique_id(self.unique_id)
            .name(self.name)
            .protocol(self.protocol)
            .state(self.state);
        if let Some(model) = self.model {
            builder = builder.model(model);
        }
        if let Some(manufacturer) = self.manufacturer {
            builder = builder.manufacturer(manufacturer);
        }
        if let Some(address) = self.address {
            builder = builder.address(address);
        }
        if let Some(bridge_id) = self.bridge_id {
            builder = builder.bridge_id(bridge_id);
        }
        builder.build()
    }
}

/// One vendor protocol implementation.
///
/// Implementations live in adapter crates (e.g. `adapter_hue`). All calls
/// are one-shot request/response against the vendor API; a transport
/// failure surfaces as [`DeviceError::Unreachable`]
/// (see [`lumen_domain::error::DeviceError`]) and the caller marks the
/// light unreachable.
pub trait ProtocolAdapter {
    /// The protocol this adapter speaks.
    fn protocol(&self) -> Protocol;

    /// Enumerate the lights currently visible to this adapter.
    fn discover(&self) -> impl Future<Output = Result<Vec<DiscoveredLight>, LumenError>> + Send;

    /// Read the device's current state.
    fn fetch_state(
        &self,
        light: &Light,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send;

    /// Push a partial state change to the device, returning the resulting
    /// full state.
    fn apply(
        &self,
        light: &Light,
        change: &StateChange,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send;
}

/// Routing port used by the services: same operations as
/// [`ProtocolAdapter`], dispatched on each light's protocol.
pub trait LightGateway: Send + Sync {
    /// Run discovery across every registered adapter.
    fn discover(&self) -> impl Future<Output = Result<Vec<DiscoveredLight>, LumenError>> + Send;

    /// Read current state through the adapter owning the light's protocol.
    fn fetch_state(
        &self,
        light: &Light,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send;

    /// Push a state change through the adapter owning the light's protocol.
    fn apply(
        &self,
        light: &Light,
        change: &StateChange,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send;
}

/// One gateway instance is shared between the HTTP state and the
/// background tasks, so `Arc<G>` forwards to `G`.
impl<T: LightGateway> LightGateway for std::sync::Arc<T> {
    fn discover(&self) -> impl Future<Output = Result<Vec<DiscoveredLight>, LumenError>> + Send {
        (**self).discover()
    }

    fn fetch_state(
        &self,
        light: &Light,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send {
        (**self).fetch_state(light)
    }

    fn apply(
        &self,
        light: &Light,
        change: &StateChange,
    ) -> impl Future<Output = Result<LightState, LumenError>> + Send {
        (**self).apply(light, change)
    }
}
