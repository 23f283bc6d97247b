//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use hotelhub_app::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, PrincipalResolver, RoomRepository,
};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the API under `/api` next to a `/health` probe. Includes a
/// [`TraceLayer`] that logs each HTTP request/response at the `DEBUG` level
/// using the `tracing` ecosystem, and a [`CorsLayer`] open to any origin so
/// browser front-ends can call the API.
pub fn build<RR, BR, DR, DA, PR>(state: AppState<RR, BR, DR, DA, PR>) -> Router
where
    RR: RoomRepository + Send + Sync + 'static,
    BR: BookingRepository + Send + Sync + 'static,
    DR: DeviceStateRepository + Send + Sync + 'static,
    DA: DoorActuator + Send + Sync + 'static,
    PR: PrincipalResolver + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentials travel in the `Authorization` header, never in cookies, so a
/// wildcard origin is enough.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health_check() -> &'static str {
    "OK"
}
