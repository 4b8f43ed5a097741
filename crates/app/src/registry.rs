//! Adapter registry — routes gateway calls to the protocol adapters.
//!
//! The composition root constructs one registry from whichever adapters the
//! configuration enables. Static dispatch throughout: the registry is
//! generic over the three adapter types and an absent adapter is `None`.

use lumen_domain::error::{DeviceError, LumenError};
use lumen_domain::light::{Light, LightState, Protocol, StateChange};

use crate::ports::protocol::{DiscoveredLight, LightGateway, ProtocolAdapter};

/// Protocol router over the configured adapters.
pub struct AdapterRegistry<H, L, V> {
    hue: Option<H>,
    lifx: Option<L>,
    virt: Option<V>,
}

impl<H, L, V> AdapterRegistry<H, L, V>
where
    H: ProtocolAdapter + Send + Sync,
    L: ProtocolAdapter + Send + Sync,
    V: ProtocolAdapter + Send + Sync,
{
    /// Build a registry from the configured adapters. `None` means the
    /// protocol is disabled; commands for it fail with
    /// [`DeviceError::NoAdapter`].
    pub fn new(hue: Option<H>, lifx: Option<L>, virt: Option<V>) -> Self {
        Self { hue, lifx, virt }
    }

    /// Which protocols currently have an adapter registered.
    #[must_use]
    pub fn registered(&self) -> Vec<Protocol> {
        let mut protocols = Vec::new();
        if self.hue.is_some() {
            protocols.push(Protocol::Hue);
        }
        if self.lifx.is_some() {
            protocols.push(Protocol::Lifx);
        }
        if self.virt.is_some() {
            protocols.push(Protocol::Virtual);
        }
        protocols
    }
}

impl<H, L, V> LightGateway for AdapterRegistry<H, L, V>
where
    H: ProtocolAdapter + Send + Sync,
    L: ProtocolAdapter + Send + Sync,
    V: ProtocolAdapter + Send + Sync,
{
    /// Run discovery on every registered adapter.
    ///
    /// A failing adapter is logged and skipped so one offline bridge does
    /// not hide the others' lights.
    async fn discover(&self) -> Result<Vec<DiscoveredLight>, LumenError> {
        let mut found = Vec::new();
        if let Some(hue) = &self.hue {
            collect(Protocol::Hue, hue.discover().await, &mut found);
        }
        if let Some(lifx) = &self.lifx {
            collect(Protocol::Lifx, lifx.discover().await, &mut found);
        }
        if let Some(virt) = &self.virt {
            collect(Protocol::Virtual, virt.discover().await, &mut found);
        }
        Ok(found)
    }

    async fn fetch_state(&self, light: &Light) -> Result<LightState, LumenError> {
        match light.protocol {
            Protocol::Hue => route(&self.hue, light)?.fetch_state(light).await,
            Protocol::Lifx => route(&self.lifx, light)?.fetch_state(light).await,
            Protocol::Virtual => route(&self.virt, light)?.fetch_state(light).await,
        }
    }

    async fn apply(&self, light: &Light, change: &StateChange) -> Result<LightState, LumenError> {
        match light.protocol {
            Protocol::Hue => route(&self.hue, light)?.apply(light, change).await,
            Protocol::Lifx => route(&self.lifx, light)?.apply(light, change).await,
            Protocol::Virtual => route(&self.virt, light)?.apply(light, change).await,
        }
    }
}

fn route<'a, A: ProtocolAdapter>(
    adapter: &'a Option<A>,
    light: &Light,
) -> Result<&'a A, LumenError> {
    adapter
        .as_ref()
        .ok_or_else(|| DeviceError::NoAdapter(light.protocol).into())
}

fn collect(
    protocol: Protocol,
    result: Result<Vec<DiscoveredLight>, LumenError>,
    found: &mut Vec<DiscoveredLight>,
) {
    match result {
        Ok(lights) => {
            tracing::debug!(%protocol, count = lights.len(), "adapter discovery finished");
            found.extend(lights);
        }
        Err(error) => {
            tracing::warn!(%protocol, %error, "adapter discovery failed, skipping");
        }
    }
}
