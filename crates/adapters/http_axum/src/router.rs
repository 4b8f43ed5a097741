//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API under `/api` plus a bare `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG`
/// level using the `tracing` ecosystem.
pub fn build<LR, GR, SR, ST, G, P>(state: AppState<LR, GR, SR, ST, G, P>) -> Router
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
