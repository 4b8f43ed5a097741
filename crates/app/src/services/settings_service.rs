//! Settings service — read and update the process-wide settings record.

use lumen_domain::error::LumenError;
use lumen_domain::event::{Event, EventType};
use lumen_domain::settings::Settings;

use crate::ports::{EventPublisher, SettingsStore};

/// Application service for the single [`Settings`] record.
pub struct SettingsService<S, P> {
    store: S,
    publisher: P,
}

impl<S, P> SettingsService<S, P>
where
    S: SettingsStore,
    P: EventPublisher,
{
    /// Create a new service backed by the given store.
    pub fn new(store: S, publisher: P) -> Self {
        Self { store, publisher }
    }

    /// Read the current settings.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn get_settings(&self) -> Result<Settings, LumenError> {
        self.store.get().await
    }

    /// Replace the settings, persisting immediately.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Validation`] for out-of-range values or a
    /// storage error from the store.
    #[tracing::instrument(skip(self, settings))]
    pub async fn update_settings(&self, settings: Settings) -> Result<Settings, LumenError> {
        settings.validate()?;
        let saved = self.store.put(settings).await?;
        let _ = self
            .publisher
            .publish(Event::new(
                EventType::SettingsUpdated,
                None,
                serde_json::to_value(&saved).unwrap_or_default(),
            ))
            .await;
        Ok(saved)
    }
}
