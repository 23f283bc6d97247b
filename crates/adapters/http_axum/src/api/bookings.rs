//! JSON REST handlers for the booking ledger.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use hotelhub_app::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, PrincipalResolver, RoomRepository,
};
use hotelhub_domain::booking::Booking;
use hotelhub_domain::id::{BookingId, RoomId};
use hotelhub_domain::time::Timestamp;

use crate::auth::CurrentPrincipal;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a booking.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: String,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Booking>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single booking.
pub enum GetResponse {
    Ok(Json<Booking>),
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
    Created(Json<Booking>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/bookings`
///
/// Administrators see every booking, guests only their own.
pub async fn list<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
) -> Result<ListResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let bookings = state.booking_service.list_bookings(&principal).await?;
    Ok(ListResponse::Ok(Json(bookings)))
}

/// `POST /api/bookings`
pub async fn create<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(req): Json<CreateBookingRequest>,
) -> Result<CreateResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let room_id = RoomId::parse(&req.room_id)?;
    let booking = state
        .booking_service
        .create_booking(&principal, room_id, req.check_in_date, req.check_out_date)
        .await?;
    Ok(CreateResponse::Created(Json(booking)))
}

/// `GET /api/bookings/{id}`
pub async fn get<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let booking = state
        .booking_service
        .get_booking(&principal, BookingId::parse(&id)?)
        .await?;
    Ok(GetResponse::Ok(Json(booking)))
}

/// `PUT /api/bookings/{id}/cancel`
pub async fn cancel<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let booking = state
        .booking_service
        .cancel_booking(&principal, BookingId::parse(&id)?)
        .await?;
    Ok(GetResponse::Ok(Json(booking)))
}

/// `PUT /api/bookings/{id}/complete`
pub async fn complete<RR, BR, DR, DA, PR>(
    State(state): State<AppState<RR, BR, DR, DA, PR>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    let booking = state
        .booking_service
        .complete_booking(&principal, BookingId::parse(&id)?)
        .await?;
    Ok(GetResponse::Ok(Json(booking)))
}
