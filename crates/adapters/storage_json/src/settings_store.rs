//! Settings store over the shared JSON document.

use std::sync::Arc;

use lumen_app::ports::SettingsStore;
use lumen_domain::error::LumenError;
use lumen_domain::settings::Settings;

use crate::store::JsonStore;

/// [`SettingsStore`] backed by [`JsonStore`]. Cheap to clone.
#[derive(Clone)]
pub struct JsonSettingsStore {
    store: Arc<JsonStore>,
}

impl JsonSettingsStore {
    /// Create a store handle over the shared store.
    #[must_use]
    pub fn new(store: Arc<JsonStore>) -> Self {
        Self { store }
    }
}

impl SettingsStore for JsonSettingsStore {
    async fn get(&self) -> Result<Settings, LumenError> {
        Ok(self.store.read(|doc| doc.settings.clone()).await)
    }

    async fn put(&self, settings: Settings) -> Result<Settings, LumenError> {
        self.store
            .mutate("update settings", |doc| {
                doc.settings = settings.clone();
                settings
            })
            .await
    }
}
