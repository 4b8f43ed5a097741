//! JSON REST handlers for lights.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_domain::id::LightId;
use lumen_domain::light::{Light, Protocol, StateChange};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a light by hand.
#[derive(Deserialize)]
pub struct CreateLightRequest {
    pub name: String,
    pub unique_id: String,
    #[serde(default)]
    pub protocol: Option<Protocol>,
}

/// Request body for renaming a light.
#[derive(Deserialize)]
pub struct RenameLightRequest {
    pub name: String,
}

/// Request body for the all-lights switch.
#[derive(Deserialize)]
pub struct SetAllRequest {
    pub on: bool,
}

/// Response body for the all-lights switch.
#[derive(Serialize)]
pub struct SetAllResponseBody {
    pub switched: usize,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Light>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get/rename/state endpoints.
pub enum LightResponse {
    Ok(Json<Light>),
}

impl IntoResponse for LightResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Light>),
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

/// `GET /api/lights`
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
    let lights = state.lights.list_lights().await?;
    Ok(ListResponse::Ok(Json(lights)))
}

/// `POST /api/lights`
pub async fn create<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Json(req): Json<CreateLightRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let light = Light::builder()
        .name(req.name)
        .unique_id(req.unique_id)
        .protocol(req.protocol.unwrap_or(Protocol::Virtual))
        .build()?;
    let created = state.lights.create_light(light).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/lights/:id`
pub async fn get<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
) -> Result<LightResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let light_id: LightId = parse_id(&id)?;
    let light = state.lights.get_light(light_id).await?;
    Ok(LightResponse::Ok(Json(light)))
}

/// `PUT /api/lights/:id`
pub async fn rename<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
    Json(req): Json<RenameLightRequest>,
) -> Result<LightResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let light_id: LightId = parse_id(&id)?;
    let light = state.lights.rename_light(light_id, req.name).await?;
    Ok(LightResponse::Ok(Json(light)))
}

/// `PUT /api/lights/:id/state`
pub async fn update_state<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
    Json(change): Json<StateChange>,
) -> Result<LightResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let light_id: LightId = parse_id(&id)?;
    let light = state.lights.set_state(light_id, change).await?;
    Ok(LightResponse::Ok(Json(light)))
}

/// `PUT /api/lights/state`
pub async fn set_all<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Json(req): Json<SetAllRequest>,
) -> Result<Json<SetAllResponseBody>, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let switched = state.lights.set_all(req.on).await?;
    Ok(Json(SetAllResponseBody { switched }))
}

/// `DELETE /api/lights/:id`
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
    let light_id: LightId = parse_id(&id)?;
    state.lights.delete_light(light_id).await?;
    Ok(DeleteResponse::NoContent)
}
