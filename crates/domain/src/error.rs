//! Common error types used across the workspace.
//!
//! Every failure a caller can observe is one of the variants of
//! [`HotelError`]. Each kind carries its own typed payload and converts via
//! `#[from]`; adapters box their infrastructure errors into
//! [`HotelError::Storage`] or [`HotelError::Actuator`].

use crate::booking::BookingStatus;
use crate::room::RoomStatus;

/// Top-level error for every hotelhub operation.
#[derive(Debug, thiserror::Error)]
pub enum HotelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Forbidden(#[from] ForbiddenError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The door actuator rejected or failed the command.
    #[error("actuator error")]
    Actuator(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that violates a domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("room number must not be empty")]
    EmptyRoomNumber,

    #[error("room number cannot be changed")]
    RoomNumberImmutable,

    #[error("price per night must be a finite, non-negative amount")]
    InvalidPrice,

    #[error("check-out must be after check-in")]
    InvalidStayWindow,

    #[error("malformed identifier: {0}")]
    InvalidId(String),
}

/// A referenced entity does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A uniqueness or overlap rule was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("room number {room_number} already exists")]
    DuplicateRoomNumber { room_number: String },

    #[error("room {room_id} is already booked for the selected dates")]
    OverlappingBooking { room_id: String },
}

/// The operation is not valid for the entity's current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("room {room_id} is not available for booking (status: {status})")]
    RoomNotAvailable { room_id: String, status: RoomStatus },

    #[error("booking cannot move from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },
}

/// The principal is authenticated but not allowed to do this.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForbiddenError {
    #[error("administrator role required")]
    AdminRequired,

    #[error("not authorized to access booking {booking_id}")]
    NotBookingOwner { booking_id: String },

    #[error("not authorized to control room {room_id}")]
    RoomControlDenied { room_id: String },
}

/// The credential could not be resolved to a principal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing credentials")]
    MissingCredential,

    #[error("could not validate credentials")]
    InvalidCredential,
}
