//! JSON REST handlers for schedules.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_domain::id::ScheduleId;
use lumen_domain::schedule::{Schedule, ScheduleAction, TimeOfDay, Weekday};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating or replacing a schedule.
#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub name: String,
    /// `"HH:MM"`.
    pub at: TimeOfDay,
    pub days: Vec<Weekday>,
    #[serde(default)]
    pub enabled: Option<bool>,
    pub actions: Vec<ScheduleAction>,
}

impl ScheduleRequest {
    fn into_schedule(self) -> Result<Schedule, ApiError> {
        let mut builder = Schedule::builder()
            .name(self.name)
            .at(self.at)
            .days(self.days);
        if let Some(enabled) = self.enabled {
            builder = builder.enabled(enabled);
        }
        for action in self.actions {
            builder = builder.action(action);
        }
        Ok(builder.build()?)
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Schedule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get/update endpoints.
pub enum ScheduleResponse {
    Ok(Json<Schedule>),
}

impl IntoResponse for ScheduleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Schedule>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/schedules`
pub async fn list<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
) -> Result<ListResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let schedules = state.schedules.list_schedules().await?;
    Ok(ListResponse::Ok(Json(schedules)))
}

/// `POST /api/schedules`
pub async fn create<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Json(req): Json<ScheduleRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let schedule = req.into_schedule()?;
    let created = state.schedules.create_schedule(schedule).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/schedules/:id`
pub async fn get<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
) -> Result<ScheduleResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    let schedule = state.schedules.get_schedule(schedule_id).await?;
    Ok(ScheduleResponse::Ok(Json(schedule)))
}

/// `PUT /api/schedules/:id`
pub async fn update<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
    Json(req): Json<ScheduleRequest>,
) -> Result<ScheduleResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    let schedule = req.into_schedule()?;
    let updated = state
        .schedules
        .update_schedule(schedule_id, schedule)
        .await?;
    Ok(ScheduleResponse::Ok(Json(updated)))
}

/// `DELETE /api/schedules/:id`
pub async fn delete<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let schedule_id: ScheduleId = parse_id(&id)?;
    state.schedules.delete_schedule(schedule_id).await?;
    Ok(DeleteResponse::NoContent)
}
