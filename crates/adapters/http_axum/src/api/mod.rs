//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod discover;
#[allow(clippy::missing_errors_doc)]
pub mod groups;
#[allow(clippy::missing_errors_doc)]
pub mod lights;
#[allow(clippy::missing_errors_doc)]
pub mod schedules;
#[allow(clippy::missing_errors_doc)]
pub mod settings;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_domain::error::{LumenError, ValidationError};

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a path segment into a typed id, mapping failures to a 400.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::from(LumenError::Validation(ValidationError::BadId(
            raw.to_string(),
        )))
    })
}

/// Build the `/api` sub-router.
pub fn routes<LR, GR, SR, ST, G, P>() -> Router<AppState<LR, GR, SR, ST, G, P>>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    Router::new()
        // Lights
        .route(
            "/lights",
            get(lights::list::<LR, GR, SR, ST, G, P>)
                .post(lights::create::<LR, GR, SR, ST, G, P>),
        )
        .route("/lights/state", put(lights::set_all::<LR, GR, SR, ST, G, P>))
        .route(
            "/lights/{id}",
            get(lights::get::<LR, GR, SR, ST, G, P>)
                .put(lights::rename::<LR, GR, SR, ST, G, P>)
                .delete(lights::delete::<LR, GR, SR, ST, G, P>),
        )
        .route(
            "/lights/{id}/state",
            put(lights::update_state::<LR, GR, SR, ST, G, P>),
        )
        // Groups
        .route(
            "/groups",
            get(groups::list::<LR, GR, SR, ST, G, P>)
                .post(groups::create::<LR, GR, SR, ST, G, P>),
        )
        .route(
            "/groups/{id}",
            get(groups::get::<LR, GR, SR, ST, G, P>)
                .put(groups::update::<LR, GR, SR, ST, G, P>)
                .delete(groups::delete::<LR, GR, SR, ST, G, P>),
        )
        .route(
            "/groups/{id}/state",
            put(groups::set_state::<LR, GR, SR, ST, G, P>),
        )
        // Schedules
        .route(
            "/schedules",
            get(schedules::list::<LR, GR, SR, ST, G, P>)
                .post(schedules::create::<LR, GR, SR, ST, G, P>),
        )
        .route(
            "/schedules/{id}",
            get(schedules::get::<LR, GR, SR, ST, G, P>)
                .put(schedules::update::<LR, GR, SR, ST, G, P>)
                .delete(schedules::delete::<LR, GR, SR, ST, G, P>),
        )
        // Settings
        .route(
            "/settings",
            get(settings::get::<LR, GR, SR, ST, G, P>)
                .put(settings::update::<LR, GR, SR, ST, G, P>),
        )
        // Discovery
        .route("/discover", post(discover::run::<LR, GR, SR, ST, G, P>))
}
