//! Storage port — repository traits for persistence.

use std::future::Future;
use std::sync::Arc;

use hotelhub_domain::booking::{Booking, BookingStatus};
use hotelhub_domain::device_state::{Appliance, DeviceState, Power};
use hotelhub_domain::error::HotelError;
use hotelhub_domain::id::{BookingId, RoomId, UserId};
use hotelhub_domain::room::{Room, RoomStatus};
use hotelhub_domain::time::Timestamp;

/// A room status write that must commit together with a booking write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomStatusChange {
    pub room_id: RoomId,
    pub status: RoomStatus,
}

/// Repository for persisting and querying [`Room`]s.
pub trait RoomRepository {
    /// Insert a new room together with its default (all off) device state,
    /// atomically.
    ///
    /// Fails with [`HotelError::Conflict`] if the room number is taken.
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send;

    /// Get a room by its unique identifier.
    fn get_by_id(&self, id: RoomId)
    -> impl Future<Output = Result<Option<Room>, HotelError>> + Send;

    /// Find a room by its human-facing number.
    fn find_by_number(
        &self,
        room_number: &str,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send;

    /// Get at most `limit` rooms, in no particular order.
    fn get_all(&self, limit: usize) -> impl Future<Output = Result<Vec<Room>, HotelError>> + Send;

    /// Overwrite the descriptive fields of an existing room. Status is left
    /// untouched.
    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send;

    /// Set the status of a room, returning the updated room if it exists.
    fn set_status(
        &self,
        id: RoomId,
        status: RoomStatus,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send;
}

/// Repository for persisting and querying [`Booking`]s.
///
/// The write methods pair each booking write with a room status write; an
/// implementation must commit both or neither.
pub trait BookingRepository {
    /// Insert `booking` and mark its room occupied, atomically.
    ///
    /// Returns `None` without writing anything when the room does not exist
    /// or is no longer available.
    fn admit(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send;

    /// Move booking `id` from `from` to `to`, applying `room` in the same
    /// transaction.
    ///
    /// Returns `false` without writing anything when the stored status is no
    /// longer `from`.
    fn transition(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        room: Option<RoomStatusChange>,
    ) -> impl Future<Output = Result<bool, HotelError>> + Send;

    /// Get a booking by its unique identifier.
    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send;

    /// Get at most `limit` bookings, in no particular order.
    fn get_all(&self, limit: usize)
    -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send;

    /// Get at most `limit` bookings owned by `user_id`.
    fn find_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send;

    /// All bookings on `room_id` whose status is active.
    fn find_active_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send;
}

/// Repository for the per-room [`DeviceState`] record.
pub trait DeviceStateRepository {
    /// Return the state of `room_id`, inserting the all-off default stamped
    /// `at` when none exists yet.
    fn get_or_create(
        &self,
        room_id: RoomId,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send;

    /// Set one appliance of `room_id`, creating the record if needed and
    /// preserving the other appliance.
    fn set(
        &self,
        room_id: RoomId,
        appliance: Appliance,
        power: Power,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send;
}

impl<T: RoomRepository + Send + Sync> RoomRepository for Arc<T> {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        (**self).create(room)
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        (**self).get_by_id(id)
    }

    fn find_by_number(
        &self,
        room_number: &str,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        (**self).find_by_number(room_number)
    }

    fn get_all(&self, limit: usize) -> impl Future<Output = Result<Vec<Room>, HotelError>> + Send {
        (**self).get_all(limit)
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        (**self).update(room)
    }

    fn set_status(
        &self,
        id: RoomId,
        status: RoomStatus,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        (**self).set_status(id, status)
    }
}

impl<T: BookingRepository + Send + Sync> BookingRepository for Arc<T> {
    fn admit(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
        (**self).admit(booking)
    }

    fn transition(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        room: Option<RoomStatusChange>,
    ) -> impl Future<Output = Result<bool, HotelError>> + Send {
        (**self).transition(id, from, to, room)
    }

    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
        (**self).get_by_id(id)
    }

    fn get_all(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        (**self).get_all(limit)
    }

    fn find_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        (**self).find_by_user(user_id, limit)
    }

    fn find_active_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        (**self).find_active_by_room(room_id)
    }
}

impl<T: DeviceStateRepository + Send + Sync> DeviceStateRepository for Arc<T> {
    fn get_or_create(
        &self,
        room_id: RoomId,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        (**self).get_or_create(room_id, at)
    }

    fn set(
        &self,
        room_id: RoomId,
        appliance: Appliance,
        power: Power,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        (**self).set(room_id, appliance, power, at)
    }
}
