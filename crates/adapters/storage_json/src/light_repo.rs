//! Light repository over the shared JSON store.

use std::sync::Arc;

use lumen_app::ports::LightRepository;
use lumen_domain::error::LumenError;
use lumen_domain::id::LightId;
use lumen_domain::light::{Light, Protocol};

use crate::store::JsonStore;

/// [`LightRepository`] backed by [`JsonStore`]. Cheap to clone.
#[derive(Clone)]
pub struct JsonLightRepository {
    store: Arc<JsonStore>,
}

impl JsonLightRepository {
    /// Create a repository handle over the shared store.
    #[must_use]
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl LightRepository for JsonLightRepository {
    async fn create(&self, light: Light) -> Result<Light, LumenError> {
        self.store
            .mutate("create light", |doc| {
                doc.lights.insert(light.id, light.clone());
                light
            })
            .await
    }

    async fn get_by_id(&self, id: LightId) -> Result<Option<Light>, LumenError> {
        Ok(self.store.read(|doc| doc.lights.get(&id).cloned()).await)
    }

    async fn get_all(&self) -> Result<Vec<Light>, LumenError> {
        Ok(self
            .store
            .read(|doc| {
                let mut all: Vec<_> = doc.lights.values().cloned().collect();
                all.sort_by_key(|light| light.created_at);
                all
            })
            .await)
    }

    async fn find_by_unique_id(
        &self,
        protocol: Protocol,
        unique_id: &str,
    ) -> Result<Option<Light>, LumenError> {
        Ok(self
            .store
            .read(|doc| {
                doc.lights
                    .values()
                    .find(|light| light.protocol == protocol && light.unique_id == unique_id)
                    .cloned()
            })
            .await)
    }

    async fn update(&self, light: Light) -> Result<Light, LumenError> {
        self.store
            .mutate("update light", |doc| {
                doc.lights.insert(light.id, light.clone());
                light
            })
            .await
    }

    async fn delete(&self, id: LightId) -> Result<(), LumenError> {
        self.store
            .mutate("delete light", |doc| {
                doc.lights.remove(&id);
            })
            .await
    }
}
