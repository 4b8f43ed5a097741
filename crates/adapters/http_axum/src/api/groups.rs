//! JSON REST handlers for groups.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use lumen_app::ports::protocol::LightGateway;
use lumen_app::ports::{
    EventPublisher, GroupRepository, LightRepository, ScheduleRepository, SettingsStore,
};
use lumen_app::services::group_service::GroupCommandOutcome;
use lumen_domain::group::Group;
use lumen_domain::id::{GroupId, LightId};
use lumen_domain::light::StateChange;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a group.
#[derive(Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub lights: Vec<String>,
}

/// Request body for updating a group. Absent fields stay unchanged.
#[derive(Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub lights: Option<Vec<String>>,
}

fn parse_members(raw: &[String]) -> Result<Vec<LightId>, ApiError> {
    raw.iter().map(|id| parse_id(id)).collect()
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Group>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get/update endpoints.
pub enum GroupResponse {
    Ok(Json<Group>),
}

impl IntoResponse for GroupResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Group>),
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

/// `GET /api/groups`
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
    let groups = state.groups.list_groups().await?;
    Ok(ListResponse::Ok(Json(groups)))
}

/// `POST /api/groups`
pub async fn create<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<CreateResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let members = parse_members(&req.lights)?;
    let group = Group::builder().name(req.name).lights(members).build()?;
    let created = state.groups.create_group(group).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `GET /api/groups/:id`
pub async fn get<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
) -> Result<GroupResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let group_id: GroupId = parse_id(&id)?;
    let group = state.groups.get_group(group_id).await?;
    Ok(GroupResponse::Ok(Json(group)))
}

/// `PUT /api/groups/:id`
pub async fn update<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<GroupResponse, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let group_id: GroupId = parse_id(&id)?;
    let members = req.lights.as_deref().map(parse_members).transpose()?;
    let updated = state.groups.update_group(group_id, req.name, members).await?;
    Ok(GroupResponse::Ok(Json(updated)))
}

/// `PUT /api/groups/:id/state`
pub async fn set_state<LR, GR, SR, ST, G, P>(
    State(state): State<AppState<LR, GR, SR, ST, G, P>>,
    Path(id): Path<String>,
    Json(change): Json<StateChange>,
) -> Result<Json<GroupCommandOutcome>, ApiError>
where
    LR: LightRepository + Send + Sync + 'static,
    GR: GroupRepository + Send + Sync + 'static,
    SR: ScheduleRepository + Send + Sync + 'static,
    ST: SettingsStore + Send + Sync + 'static,
    G: LightGateway + 'static,
    P: EventPublisher + Send + Sync + 'static,
{
    let group_id: GroupId = parse_id(&id)?;
    let outcome = state.groups.set_state(group_id, change).await?;
    Ok(Json(outcome))
}

/// `DELETE /api/groups/:id`
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
    let group_id: GroupId = parse_id(&id)?;
    state.groups.delete_group(group_id).await?;
    Ok(DeleteResponse::NoContent)
}
