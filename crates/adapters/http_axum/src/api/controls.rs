//! In-room controls: light, air-conditioning, door.
//!
//! Every handler goes through `RoomControlService`, which refuses callers
//! without a current stay before touching any state.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use hotelhub_app::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, PrincipalResolver, RoomRepository,
};
use hotelhub_domain::device_state::{DeviceState, Power};
use hotelhub_domain::id::RoomId;

use crate::auth::CurrentPrincipal;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for switching an appliance.
#[derive(Deserialize)]
pub struct SwitchRequest {
    pub state: Power,
}

/// Acknowledgement of a door command.
#[derive(Serialize)]
pub struct UnlockBody {
    pub status: &'static str,
    pub message: &'static str,
}

/// Possible responses from the state endpoints.
pub enum StateResponse {
    Ok(Json<DeviceState>),
}

impl IntoResponse for StateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the unlock endpoint.
pub enum UnlockResponse {
    Unlocked,
}

impl IntoResponse for UnlockResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Unlocked => Json(UnlockBody {
                status: "success",
                message: "Door unlocked successfully",
            })
            .into_response(),
        }
    }
}

/// `GET /api/room-status/{room_id}`
pub async fn get_state<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(room_id): Path<String>,
) -> Result<StateResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let current = state
        .room_control
        .get_state(&principal, RoomId::parse(&room_id)?)
        .await?;
    Ok(StateResponse::Ok(Json(current)))
}

/// `PUT /api/room-status/{room_id}/light`
pub async fn set_light<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(room_id): Path<String>,
    Json(req): Json<SwitchRequest>,
) -> Result<StateResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let updated = state
        .room_control
        .set_light(&principal, RoomId::parse(&room_id)?, req.state)
        .await?;
    Ok(StateResponse::Ok(Json(updated)))
}

/// `PUT /api/room-status/{room_id}/ac`
pub async fn set_ac<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(room_id): Path<String>,
    Json(req): Json<SwitchRequest>,
) -> Result<StateResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let updated = state
        .room_control
        .set_ac(&principal, RoomId::parse(&room_id)?, req.state)
        .await?;
    Ok(StateResponse::Ok(Json(updated)))
}

/// `POST /api/door-control/{room_id}/unlock`
pub async fn unlock<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(room_id): Path<String>,
) -> Result<UnlockResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    state
        .room_control
        .unlock_door(&principal, RoomId::parse(&room_id)?)
        .await?;
    Ok(UnlockResponse::Unlocked)
}
