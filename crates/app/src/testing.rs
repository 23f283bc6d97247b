//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use hotelhub_domain::booking::{Booking, BookingStatus};
use hotelhub_domain::device_state::{Appliance, DeviceState, Power};
use hotelhub_domain::error::{ConflictError, HotelError};
use hotelhub_domain::id::{BookingId, RoomId, UserId};
use hotelhub_domain::room::{Room, RoomStatus};
use hotelhub_domain::time::{Timestamp, now};

use crate::ports::{
    BookingRepository, DeviceStateRepository, DoorActuator, RoomRepository, RoomStatusChange,
};

/// One store backing every repository port, so booking writes can touch
/// room status under the same lock.
///
/// Reads yield to the scheduler once before completing, which lets tests
/// interleave concurrent service calls.
#[derive(Default)]
pub struct InMemoryStore {
    rooms: Mutex<HashMap<RoomId, Room>>,
    bookings: Mutex<HashMap<BookingId, Booking>>,
    states: Mutex<HashMap<RoomId, DeviceState>>,
}

impl InMemoryStore {
    pub fn room_status(&self, id: RoomId) -> Option<RoomStatus> {
        self.rooms.lock().unwrap().get(&id).map(|room| room.status)
    }

    pub fn stored_state(&self, id: RoomId) -> Option<DeviceState> {
        self.states.lock().unwrap().get(&id).cloned()
    }

    /// Insert a room without provisioning its device state.
    pub fn insert_room(&self, room: Room) {
        self.rooms.lock().unwrap().insert(room.id, room);
    }

    pub fn insert_booking(&self, booking: Booking) {
        self.bookings.lock().unwrap().insert(booking.id, booking);
    }
}

impl RoomRepository for InMemoryStore {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        let mut rooms = self.rooms.lock().unwrap();
        let result = if rooms.values().any(|r| r.room_number == room.room_number) {
            Err(ConflictError::DuplicateRoomNumber {
                room_number: room.room_number.clone(),
            }
            .into())
        } else {
            rooms.insert(room.id, room.clone());
            self.states
                .lock()
                .unwrap()
                .insert(room.id, DeviceState::new(room.id, now()));
            Ok(room)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let result = self.rooms.lock().unwrap().get(&id).cloned();
        async move {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }

    fn find_by_number(
        &self,
        room_number: &str,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let result = self
            .rooms
            .lock()
            .unwrap()
            .values()
            .find(|r| r.room_number == room_number)
            .cloned();
        async { Ok(result) }
    }

    fn get_all(&self, limit: usize) -> impl Future<Output = Result<Vec<Room>, HotelError>> + Send {
        let result: Vec<Room> = self
            .rooms
            .lock()
            .unwrap()
            .values()
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        let mut rooms = self.rooms.lock().unwrap();
        let mut stored = room.clone();
        if let Some(existing) = rooms.get(&room.id) {
            stored.status = existing.status;
        }
        rooms.insert(stored.id, stored.clone());
        async { Ok(stored) }
    }

    fn set_status(
        &self,
        id: RoomId,
        status: RoomStatus,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let mut rooms = self.rooms.lock().unwrap();
        let result = rooms.get_mut(&id).map(|room| {
            room.status = status;
            room.clone()
        });
        async { Ok(result) }
    }
}

impl BookingRepository for InMemoryStore {
    fn admit(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
        let mut rooms = self.rooms.lock().unwrap();
        let mut bookings = self.bookings.lock().unwrap();
        let result = match rooms.get_mut(&booking.room_id) {
            Some(room) if room.status == RoomStatus::Available => {
                room.status = RoomStatus::Occupied;
                bookings.insert(booking.id, booking.clone());
                Some(booking)
            }
            _ => None,
        };
        async { Ok(result) }
    }

    fn transition(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        room: Option<RoomStatusChange>,
    ) -> impl Future<Output = Result<bool, HotelError>> + Send {
        let mut rooms = self.rooms.lock().unwrap();
        let mut bookings = self.bookings.lock().unwrap();
        let applied = match bookings.get_mut(&id) {
            Some(booking) if booking.status == from => {
                booking.status = to;
                if let Some(change) = room {
                    if let Some(stored) = rooms.get_mut(&change.room_id) {
                        stored.status = change.status;
                    }
                }
                true
            }
            _ => false,
        };
        async move { Ok(applied) }
    }

    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
        let result = self.bookings.lock().unwrap().get(&id).cloned();
        async { Ok(result) }
    }

    fn get_all(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let result: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let result: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.user_id == user_id)
            .take(limit)
            .cloned()
            .collect();
        async { Ok(result) }
    }

    fn find_active_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let result: Vec<Booking> = self
            .bookings
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.room_id == room_id && b.is_active())
            .cloned()
            .collect();
        async move {
            tokio::task::yield_now().await;
            Ok(result)
        }
    }
}

impl DeviceStateRepository for InMemoryStore {
    fn get_or_create(
        &self,
        room_id: RoomId,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        let state = self
            .states
            .lock()
            .unwrap()
            .entry(room_id)
            .or_insert_with(|| DeviceState::new(room_id, at))
            .clone();
        async { Ok(state) }
    }

    fn set(
        &self,
        room_id: RoomId,
        appliance: Appliance,
        power: Power,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        let mut states = self.states.lock().unwrap();
        let state = states
            .entry(room_id)
            .or_insert_with(|| DeviceState::new(room_id, at));
        state.set(appliance, power, at);
        let state = state.clone();
        async { Ok(state) }
    }
}

/// Door actuator that records every unlock it is asked to perform.
#[derive(Default)]
pub struct RecordingDoor {
    unlocked: Mutex<Vec<RoomId>>,
}

impl RecordingDoor {
    pub fn unlocked(&self) -> Vec<RoomId> {
        self.unlocked.lock().unwrap().clone()
    }
}

impl DoorActuator for RecordingDoor {
    fn unlock(&self, room_id: RoomId) -> impl Future<Output = Result<(), HotelError>> + Send {
        self.unlocked.lock().unwrap().push(room_id);
        async { Ok(()) }
    }
}
