//! JSON REST handler for on-demand discovery runs.

use axum::Json;
use axum::extract::State;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_app::services::discovery_service::DiscoveryReport;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/discover`
pub async fn run<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
) -> Result<Json<DiscoveryReport>, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let report = state.discovery.run().await?;
    Ok(Json(report))
}
