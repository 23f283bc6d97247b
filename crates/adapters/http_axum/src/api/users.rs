//! Caller introspection.

use axum::Json;

use hotelhub_domain::principal::Principal;

use crate::auth::CurrentPrincipal;

/// `GET /api/users/me`
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> Json<Principal> {
    Json(principal)
}
