//! Discovery service — enumerate vendor devices and reconcile the store.

use serde::Serialize;

use lumen_domain::error::LumenError;
use lumen_domain::event::{Event, EventType};
use lumen_domain::light::Light;
use lumen_domain::time::now;

use crate::ports::protocol::{DiscoveredLight, LightGateway};
use crate::ports::{EventPublisher, LightRepository};

/// Summary of one discovery pass.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct DiscoveryReport {
    /// Lights the adapters reported, total.
    pub discovered: usize,
    /// Lights that were not yet in the store.
    pub added: usize,
    /// Lights that already existed and were refreshed.
    pub refreshed: usize,
}

/// Application service running adapter discovery and upserting lights.
pub struct DiscoveryService<LR, G, P> {
    repo: LR,
    gateway: G,
    publisher: P,
}

impl<LR, G, P> DiscoveryService<LR, G, P>
where
    LR: LightRepository,
    G: LightGateway,
    P: EventPublisher,
{
    /// Create a new service backed by the given ports.
    pub fn new(repo: LR, gateway: G, publisher: P) -> Self {
        Self {
            repo,
            gateway,
            publisher,
        }
    }

    /// Run discovery on every registered adapter and upsert the results.
    ///
    /// Known lights (matched by protocol + vendor handle) keep their id,
    /// user-chosen name, and creation time; only device-reported metadata
    /// and state are refreshed. New lights are created and announced with a
    /// [`EventType::LightDiscovered`] event.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn run(&self) -> Result<DiscoveryReport, LumenError> {
        let found = self.gateway.discover().await?;
        let mut report = DiscoveryReport {
            discovered: found.len(),
            ..DiscoveryReport::default()
        };

        for discovered in found {
            match self
                .repo
                .find_by_unique_id(discovered.protocol, &discovered.unique_id)
                .await?
            {
                Some(existing) => {
                    self.refresh_existing(existing, discovered).await?;
                    report.refreshed += 1;
                }
                None => {
                    match self.add_new(discovered).await {
                        Ok(()) => report.added += 1,
                        // A vendor record without name or handle is noise,
                        // not a reason to abort the whole pass.
                        Err(LumenError::Validation(error)) => {
                            tracing::warn!(%error, "skipping malformed discovery record");
                        }
                        Err(other) => return Err(other),
                    }
                }
            }
        }

        tracing::info!(
            discovered = report.discovered,
            added = report.added,
            "discovery pass finished"
        );
        Ok(report)
    }

    async fn refresh_existing(
        &self,
        mut existing: Light,
        discovered: DiscoveredLight,
    ) -> Result<(), LumenError> {
        existing.model = discovered.model;
        existing.manufacturer = discovered.manufacturer;
        existing.address = discovered.address;
        existing.bridge_id = discovered.bridge_id;
        existing.update_state(discovered.state, now());
        self.repo.update(existing).await?;
        Ok(())
    }

    async fn add_new(&self, discovered: DiscoveredLight) -> Result<(), LumenError> {
        let light = discovered.into_light()?;
        let light = self.repo.create(light).await?;
        let _ = self
            .publisher
            .publish(Event::new(
                EventType::LightDiscovered,
                Some(light.id),
                serde_json::json!({
                    "name": light.name,
                    "protocol": light.protocol,
                }),
            ))
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeGateway, InMemoryLightRepo, SpyPublisher};
    use lumen_domain::light::{LightState, Protocol};

    struct Fixture {
        service: DiscoveryService<InMemoryLightRepo, FakeGateway, SpyPublisher>,
        repo: InMemoryLightRepo,
        gateway: FakeGateway,
        publisher: SpyPublisher,
    }

    fn fixture() -> Fixture {
        let repo = InMemoryLightRepo::default();
        let gateway = FakeGateway::default();
        let publisher = SpyPublisher::default();
        let service = DiscoveryService::new(repo.clone(), gateway.clone(), publisher.clone());
        Fixture {
            service,
            repo,
            gateway,
            publisher,
        }
    }

    fn discovered(unique_id: &str, name: &str) -> DiscoveredLight {
        DiscoveredLight {
            unique_id: unique_id.to_string(),
            name: name.to_string(),
            protocol: Protocol::Hue,
            model: Some("LCT015".to_string()),
            manufacturer: Some("Signify".to_string()),
            address: Some("192.168.1.50".to_string()),
            bridge_id: None,
            state: LightState {
                on: true,
                brightness: 80,
                ..LightState::default()
            },
        }
    }

    #[tokio::test]
    async fn should_add_unknown_lights() {
        let fx = fixture();
        fx.gateway.add_discovered(discovered("1", "Hallway"));
        fx.gateway.add_discovered(discovered("2", "Kitchen"));

        let report = fx.service.run().await.unwrap();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.added, 2);
        assert_eq!(fx.repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn should_preserve_id_and_name_for_known_lights() {
        let fx = fixture();
        fx.gateway.add_discovered(discovered("1", "Hallway"));
        fx.service.run().await.unwrap();

        // User renames the light between discovery passes.
        let mut light = fx
            .repo
            .find_by_unique_id(Protocol::Hue, "1")
            .await
            .unwrap()
            .unwrap();
        let original_id = light.id;
        light.name = "Front Door".to_string();
        fx.repo.update(light).await.unwrap();

        let report = fx.service.run().await.unwrap();
        assert_eq!(report.added, 0);
        assert_eq!(report.refreshed, 1);

        let light = fx
            .repo
            .find_by_unique_id(Protocol::Hue, "1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(light.id, original_id);
        assert_eq!(light.name, "Front Door");
        // Device-reported state was still refreshed.
        assert!(light.state.on);
    }

    #[tokio::test]
    async fn should_publish_event_only_for_new_lights() {
        let fx = fixture();
        fx.gateway.add_discovered(discovered("1", "Hallway"));

        fx.service.run().await.unwrap();
        fx.service.run().await.unwrap();

        let events = fx.publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::LightDiscovered);
    }

    #[tokio::test]
    async fn should_skip_malformed_discovery_records() {
        let fx = fixture();
        fx.gateway.add_discovered(discovered("", "No handle"));
        fx.gateway.add_discovered(discovered("2", "Kitchen"));

        let report = fx.service.run().await.unwrap();

        assert_eq!(report.discovered, 2);
        assert_eq!(report.added, 1);
    }

    #[tokio::test]
    async fn should_propagate_gateway_failure() {
        let fx = fixture();
        fx.gateway.set_failing(true);
        assert!(fx.service.run().await.is_err());
    }
}
