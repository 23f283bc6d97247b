//! JSON REST handlers for the room registry.
//!
//! Reads are public. Writes require an administrator.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hotelhub_app::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, PrincipalResolver, RoomRepository,
};
use hotelhub_domain::id::RoomId;
use hotelhub_domain::room::{Room, RoomSpec, RoomStatus};

use crate::auth::CurrentPrincipal;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for forcing a room status.
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RoomStatus,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Room>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single room.
pub enum GetResponse {
    Ok(Json<Room>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Room>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/rooms`
pub async fn list<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
) -> Result<ListResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let rooms = state.room_service.list_rooms().await?;
    Ok(ListResponse::Ok(Json(rooms)))
}

/// `GET /api/rooms/{id}`
pub async fn get<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let room = state.room_service.get_room(RoomId::parse(&id)?).await?;
    Ok(GetResponse::Ok(Json(room)))
}

/// `POST /api/rooms`
pub async fn create<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(spec): Json<RoomSpec>,
) -> Result<CreateResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    principal.require_admin()?;
    let created = state.room_service.create_room(spec).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/rooms/{id}`
pub async fn update<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    Json(spec): Json<RoomSpec>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    principal.require_admin()?;
    let updated = state
        .room_service
        .update_room(RoomId::parse(&id)?, spec)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `PUT /api/rooms/{id}/status`
pub async fn set_status<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    principal.require_admin()?;
    let updated = state
        .room_service
        .set_room_status(RoomId::parse(&id)?, req.status)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}
