//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod controls;
#[allow(clippy::missing_errors_doc)]
pub mod rooms;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Json;
use axum::Router;
use axum::routing::{get, post, put};
use serde::Serialize;

use hotelhub_app::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, PrincipalResolver, RoomRepository,
};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<RR, BR, DR, DA, PR>() -> Router<AppState<RR, BR, DR, DA, PR>>
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(welcome))
        .route("/users/me", get(users::me))
        // Rooms
        .route(
            "/rooms",
            get(rooms::list::<RR, BR, DR, DA, PR>).post(rooms::create::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/rooms/{id}",
            get(rooms::get::<RR, BR, DR, DA, PR>).put(rooms::update::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/rooms/{id}/status",
            put(rooms::set_status::<RR, BR, DR, DA, PR>),
        )
        // Bookings
        .route(
            "/bookings",
            get(bookings::list::<RR, BR, DR, DA, PR>)
                .post(bookings::create::<RR, BR, DR, DA, PR>),
        )
        .route("/bookings/{id}", get(bookings::get::<RR, BR, DR, DA, PR>))
        .route(
            "/bookings/{id}/cancel",
            put(bookings::cancel::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/bookings/{id}/complete",
            put(bookings::complete::<RR, BR, DR, DA, PR>),
        )
        // In-room controls
        .route(
            "/room-status/{room_id}",
            get(controls::get_state::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/room-status/{room_id}/light",
            put(controls::set_light::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/room-status/{room_id}/ac",
            put(controls::set_ac::<RR, BR, DR, DA, PR>),
        )
        .route(
            "/door-control/{room_id}/unlock",
            post(controls::unlock::<RR, BR, DR, DA, PR>),
        )
}

#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// `GET /api/`
async fn welcome() -> Json<Message> {
    Json(Message {
        message: "Welcome to Hotel Access Management API",
    })
}
