//! HTTP error response mapping.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use hotelhub_domain::error::HotelError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HotelError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HotelError);

impl ApiError {
    /// The wrapped application error.
    #[must_use]
    pub fn inner(&self) -> &HotelError {
        &self.0
    }
}

impl<E: Into<HotelError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HotelError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HotelError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HotelError::Conflict(err) => (StatusCode::CONFLICT, err.to_string()),
            HotelError::State(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            HotelError::Forbidden(err) => (StatusCode::FORBIDDEN, err.to_string()),
            HotelError::Auth(err) => {
                let mut response =
                    (StatusCode::UNAUTHORIZED, Json(ErrorBody { error: err.to_string() }))
                        .into_response();
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
                return response;
            }
            HotelError::Actuator(err) => {
                tracing::error!(error = %err, "actuator error");
                (StatusCode::BAD_GATEWAY, "door controller unavailable".to_string())
            }
            HotelError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelhub_domain::error::{
        AuthError, ConflictError, ForbiddenError, NotFoundError, StateError, ValidationError,
    };
    use hotelhub_domain::room::RoomStatus;

    fn status_of(err: impl Into<HotelError>) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn should_map_each_error_kind_to_its_status() {
        assert_eq!(status_of(ValidationError::InvalidStayWindow), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(NotFoundError {
                entity: "Room",
                id: "x".to_string()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ConflictError::OverlappingBooking {
                room_id: "x".to_string()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(StateError::RoomNotAvailable {
                room_id: "x".to_string(),
                status: RoomStatus::Maintenance
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ForbiddenError::AdminRequired), StatusCode::FORBIDDEN);
    }

    #[test]
    fn should_challenge_for_bearer_on_auth_error() {
        let response = ApiError::from(AuthError::InvalidCredential).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn should_hide_storage_details() {
        let source = std::io::Error::other("disk full");
        let response = ApiError::from(HotelError::Storage(Box::new(source))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
