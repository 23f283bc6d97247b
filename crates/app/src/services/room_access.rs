//! Room access — who may control a room right now.

use hotelhub_domain::error::{ForbiddenError, HotelError};
use hotelhub_domain::id::RoomId;
use hotelhub_domain::principal::Principal;
use hotelhub_domain::time::{Timestamp, now};

use crate::ports::BookingRepository;

/// The room-control authorization predicate.
///
/// Administrators may always control a room. A guest may control a room iff
/// they own an active booking on it whose stay covers the current instant.
/// Nothing is cached: every call reads the ledger.
pub struct RoomAccess<BR> {
    bookings: BR,
}

impl<BR: BookingRepository> RoomAccess<BR> {
    pub fn new(bookings: BR) -> Self {
        Self { bookings }
    }

    /// Decide whether `principal` may control `room_id` now.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn authorize_room_control(
        &self,
        principal: &Principal,
        room_id: RoomId,
    ) -> Result<bool, HotelError> {
        self.authorize_room_control_at(principal, room_id, now())
            .await
    }

    /// Decide whether `principal` may control `room_id` at instant `at`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn authorize_room_control_at(
        &self,
        principal: &Principal,
        room_id: RoomId,
        at: Timestamp,
    ) -> Result<bool, HotelError> {
        if principal.is_admin() {
            return Ok(true);
        }
        let bookings = self.bookings.find_active_by_room(room_id).await?;
        Ok(bookings
            .iter()
            .any(|booking| booking.grants_access(principal.id, at)))
    }

    /// Like [`authorize_room_control`](Self::authorize_room_control), but a
    /// denial is an error.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Forbidden`] on denial, or a storage error.
    pub async fn require_room_control(
        &self,
        principal: &Principal,
        room_id: RoomId,
    ) -> Result<(), HotelError> {
        if self.authorize_room_control(principal, room_id).await? {
            Ok(())
        } else {
            tracing::warn!(user_id = %principal.id, room_id = %room_id, "room control denied");
            Err(ForbiddenError::RoomControlDenied {
                room_id: room_id.to_string(),
            }
            .into())
        }
    }
}
