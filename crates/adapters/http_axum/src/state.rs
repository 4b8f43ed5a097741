//! Shared application state for axum handlers.

use std::sync::Arc;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_app::services::discovery_service::DiscoveryService;
use lumen_app::services::group_service::GroupService;
use lumen_app::services::light_service::LightService;
use lumen_app::services::schedule_service::ScheduleService;
use lumen_app::services::settings_service::SettingsService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository, gateway, and publisher types to avoid
/// dynamic dispatch. `Clone` is implemented manually so the underlying
/// types themselves do not need to be `Clone` — only the `Arc` wrappers
/// are cloned.
pub struct AppState<LR, GR, SR, ST, G, P> {
    /// Light CRUD + device commands.
    pub lights: Arc<LightService<LR, GR, SR, G, P>>,
    /// Group CRUD + fan-out commands.
    pub groups: Arc<GroupService<LR, GR, SR, G, P>>,
    /// Schedule CRUD.
    pub schedules: Arc<ScheduleService<SR>>,
    /// Settings read/update.
    pub settings: Arc<SettingsService<ST, P>>,
    /// On-demand discovery runs.
    pub discovery: Arc<DiscoveryService<LR, G, P>>,
}

impl<LR, GR, SR, ST, G, P> Clone for AppState<LR, GR, SR, ST, G, P> {
    fn clone(&self) -> Self {
        Self {
            lights: Arc::clone(&self.lights),
            groups: Arc::clone(&self.groups),
            schedules: Arc::clone(&self.schedules),
            settings: Arc::clone(&self.settings),
            discovery: Arc::clone(&self.discovery),
        }
    }
}

impl<LR, GR, SR, ST, G, P> AppState<LR, GR, SR, ST, G, P>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    /// Create application state from pre-wrapped `Arc` services.
    ///
    /// Services are shared with background tasks (scheduler, poll loop),
    /// so the binary wraps them first and hands clones to everyone.
    pub fn from_arcs(
        lights: Arc<LightService<LR, GR, SR, G, P>>,
        groups: Arc<GroupService<LR, GR, SR, G, P>>,
        schedules: Arc<ScheduleService<SR>>,
        settings: Arc<SettingsService<ST, P>>,
        discovery: Arc<DiscoveryService<LR, G, P>>,
    ) -> Self {
        Self {
            lights,
            groups,
            schedules,
            settings,
            discovery,
        }
    }
}
