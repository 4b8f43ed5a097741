//! JSON REST handlers for settings.

use axum::Json;
use axum::extract::State;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_domain::settings::Settings;

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/settings`
pub async fn get<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
) -> Result<Json<Settings>, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let settings = state.settings.get_settings().await?;
    Ok(Json(settings))
}

/// `PUT /api/settings`
pub async fn update<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Json(settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let saved = state.settings.update_settings(settings).await?;
    Ok(Json(saved))
}
