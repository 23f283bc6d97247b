//! Booking service — the booking ledger.
//!
//! Admission runs while holding the room's entry in [`RoomLocks`]. The room
//! must exist and must not be out of service. No active booking on it may
//! overlap the requested stay, and a room still held by an earlier booking
//! is not available. The new booking is then written together with the
//! room's move to occupied, and the write itself only succeeds on an
//! available room.
//!
//! Of two racing requests for overlapping stays, the loser always sees the
//! winner's booking and gets a conflict. Of two racing requests for disjoint
//! stays, the loser sees the room occupied.

use hotelhub_domain::booking::{Booking, BookingStatus, StayWindow};
use hotelhub_domain::error::{ConflictError, ForbiddenError, HotelError, NotFoundError, StateError};
use hotelhub_domain::id::{BookingId, RoomId};
use hotelhub_domain::principal::Principal;
use hotelhub_domain::room::{Room, RoomStatus};
use hotelhub_domain::time::{Timestamp, now};

use crate::locks::RoomLocks;
use crate::ports::{BookingRepository, RoomRepository, RoomStatusChange};
use crate::services::LIST_LIMIT;

/// Application service for booking admission and lifecycle.
pub struct BookingService<RR, BR> {
    rooms: RR,
    bookings: BR,
    locks: RoomLocks,
}

impl<RR: RoomRepository, BR: BookingRepository> BookingService<RR, BR> {
    /// Create a new service backed by the given repositories.
    pub fn new(rooms: RR, bookings: BR) -> Self {
        Self {
            rooms,
            bookings,
            locks: RoomLocks::new(),
        }
    }

    /// Admit a stay in `room_id` for `principal`.
    ///
    /// # Errors
    ///
    /// - [`HotelError::Validation`] if `check_out` is not after `check_in`
    /// - [`HotelError::NotFound`] if the room does not exist
    /// - [`HotelError::State`] if the room is out of service, or is held by
    ///   a booking that does not overlap the stay
    /// - [`HotelError::Conflict`] if an active booking overlaps the stay
    /// - a storage error propagated from the repositories
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn create_booking(
        &self,
        principal: &Principal,
        room_id: RoomId,
        check_in: Timestamp,
        check_out: Timestamp,
    ) -> Result<Booking, HotelError> {
        let window = StayWindow::new(check_in, check_out)?;

        let _guard = self.locks.acquire(room_id).await;

        let room = self.load_room(room_id).await?;
        if room.status.is_out_of_service() {
            return Err(not_available(&room));
        }

        let active = self.bookings.find_active_by_room(room_id).await?;
        if active.iter().any(|existing| existing.conflicts_with(&window)) {
            tracing::debug!(room_id = %room_id, "booking rejected: overlapping stay");
            return Err(ConflictError::OverlappingBooking {
                room_id: room_id.to_string(),
            }
            .into());
        }
        if !room.status.accepts_bookings() {
            return Err(not_available(&room));
        }

        let Some(booking) = self
            .bookings
            .admit(Booking::admit(&room, principal.id, window, now()))
            .await?
        else {
            // An administrator changed the room's status since it was read.
            let current = self.load_room(room_id).await?;
            return Err(not_available(&current));
        };
        tracing::info!(booking_id = %booking.id, room_id = %room_id, "booking admitted");
        Ok(booking)
    }

    /// Bookings visible to `principal`: everything for administrators, own
    /// bookings for guests. Capped at [`LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_bookings(&self, principal: &Principal) -> Result<Vec<Booking>, HotelError> {
        if principal.is_admin() {
            self.bookings.get_all(LIST_LIMIT).await
        } else {
            self.bookings.find_by_user(principal.id, LIST_LIMIT).await
        }
    }

    /// Look up a booking the principal owns (or any booking, for admins).
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::NotFound`] if absent, [`HotelError::Forbidden`]
    /// if `principal` is neither the owner nor an administrator.
    pub async fn get_booking(
        &self,
        principal: &Principal,
        id: BookingId,
    ) -> Result<Booking, HotelError> {
        let booking = self.load(id).await?;
        if !principal.may_act_for(booking.user_id) {
            return Err(ForbiddenError::NotBookingOwner {
                booking_id: id.to_string(),
            }
            .into());
        }
        Ok(booking)
    }

    /// Cancel a booking and release its room.
    ///
    /// The room is set back to available whenever an active booking is
    /// cancelled, regardless of other bookings on it.
    ///
    /// # Errors
    ///
    /// Same as [`get_booking`](Self::get_booking), plus
    /// [`HotelError::State`] when the booking is already cancelled or
    /// completed.
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn cancel_booking(
        &self,
        principal: &Principal,
        id: BookingId,
    ) -> Result<Booking, HotelError> {
        let booking = self.get_booking(principal, id).await?;
        self.finish(booking, BookingStatus::Cancelled).await
    }

    /// Mark an active booking completed (guest checked out) and release its
    /// room. Administrators only.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Forbidden`] for non-administrators,
    /// [`HotelError::NotFound`] if absent, [`HotelError::State`] unless the
    /// booking is active.
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn complete_booking(
        &self,
        principal: &Principal,
        id: BookingId,
    ) -> Result<Booking, HotelError> {
        principal.require_admin()?;
        let booking = self.load(id).await?;
        self.finish(booking, BookingStatus::Completed).await
    }

    async fn load(&self, id: BookingId) -> Result<Booking, HotelError> {
        self.bookings.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Booking",
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn load_room(&self, room_id: RoomId) -> Result<Room, HotelError> {
        self.rooms.get_by_id(room_id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Room",
                id: room_id.to_string(),
            }
            .into()
        })
    }

    async fn finish(&self, booking: Booking, to: BookingStatus) -> Result<Booking, HotelError> {
        let _guard = self.locks.acquire(booking.room_id).await;

        let from = booking.status;
        let mut updated = booking;
        updated.transition(to)?;

        let release = (from == BookingStatus::Active).then_some(RoomStatusChange {
            room_id: updated.room_id,
            status: RoomStatus::Available,
        });
        let applied = self
            .bookings
            .transition(updated.id, from, to, release)
            .await?;
        if !applied {
            let current = self.load(updated.id).await?;
            return Err(StateError::InvalidTransition {
                from: current.status,
                to,
            }
            .into());
        }

        tracing::info!(booking_id = %updated.id, room_id = %updated.room_id, status = %to, "booking closed");
        Ok(updated)
    }
}

fn not_available(room: &Room) -> HotelError {
    StateError::RoomNotAvailable {
        room_id: room.id.to_string(),
        status: room.status,
    }
    .into()
}
