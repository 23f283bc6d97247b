//! Room service — the room registry.

use hotelhub_domain::error::{ConflictError, HotelError, NotFoundError};
use hotelhub_domain::id::RoomId;
use hotelhub_domain::room::{Room, RoomSpec, RoomStatus};

use crate::ports::RoomRepository;
use crate::services::LIST_LIMIT;

/// Application service for room inventory.
pub struct RoomService<RR> {
    rooms: RR,
}

impl<RR: RoomRepository> RoomService<RR> {
    /// Create a new service backed by the given repository.
    pub fn new(rooms: RR) -> Self {
        Self { rooms }
    }

    /// Register a new, available room and provision its device state.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Validation`] for an invalid spec,
    /// [`HotelError::Conflict`] if the room number is taken, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self, spec), fields(room_number = %spec.room_number))]
    pub async fn create_room(&self, spec: RoomSpec) -> Result<Room, HotelError> {
        spec.validate()?;
        if self.rooms.find_by_number(&spec.room_number).await?.is_some() {
            return Err(ConflictError::DuplicateRoomNumber {
                room_number: spec.room_number,
            }
            .into());
        }
        let room = self.rooms.create(Room::from_spec(spec)?).await?;
        tracing::info!(room_id = %room.id, "room created");
        Ok(room)
    }

    /// Look up a room by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::NotFound`] when no room with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_room(&self, id: RoomId) -> Result<Room, HotelError> {
        self.rooms
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// List rooms, capped at [`LIST_LIMIT`].
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, HotelError> {
        self.rooms.get_all(LIST_LIMIT).await
    }

    /// Replace the descriptive fields of a room. Id, number and status are
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::NotFound`] if the room does not exist,
    /// [`HotelError::Validation`] for an invalid spec or an attempted
    /// rename, or a storage error.
    #[tracing::instrument(skip(self, spec))]
    pub async fn update_room(&self, id: RoomId, spec: RoomSpec) -> Result<Room, HotelError> {
        let mut room = self.get_room(id).await?;
        room.apply(spec)?;
        self.rooms.update(room).await
    }

    /// Force a room's status. No check against its bookings is made.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::NotFound`] if the room does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self))]
    pub async fn set_room_status(&self, id: RoomId, status: RoomStatus) -> Result<Room, HotelError> {
        let room = self
            .rooms
            .set_status(id, status)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(room_id = %id, %status, "room status overridden");
        Ok(room)
    }
}

fn not_found(id: RoomId) -> HotelError {
    NotFoundError {
        entity: "Room",
        id: id.to_string(),
    }
    .into()
}
