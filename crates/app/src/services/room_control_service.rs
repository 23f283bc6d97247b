//! Room control service — device state and door unlock behind the access gate.

use hotelhub_domain::device_state::{Appliance, DeviceState, Power};
use hotelhub_domain::error::{HotelError, NotFoundError};
use hotelhub_domain::id::RoomId;
use hotelhub_domain::principal::Principal;
use hotelhub_domain::time::now;

use crate::ports::{BookingRepository, DeviceStateRepository, DoorActuator, RoomRepository};
use crate::services::room_access::RoomAccess;

/// Application service for in-room device control.
///
/// Every operation asks [`RoomAccess`] first and returns
/// [`HotelError::Forbidden`] before any device state is read or written.
pub struct RoomControlService<RR, BR, DR, DA> {
    rooms: RR,
    access: RoomAccess<BR>,
    device_states: DR,
    door: DA,
}

impl<RR, BR, DR, DA> RoomControlService<RR, BR, DR, DA>
where
    RR: RoomRepository,
    BR: BookingRepository,
    DR: DeviceStateRepository,
    DA: DoorActuator,
{
    /// Create a new service backed by the given repositories and actuator.
    pub fn new(rooms: RR, bookings: BR, device_states: DR, door: DA) -> Self {
        Self {
            rooms,
            access: RoomAccess::new(bookings),
            device_states,
            door,
        }
    }

    /// Current light/AC state of a room, created with defaults on first read.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Forbidden`] if `principal` may not control the
    /// room, [`HotelError::NotFound`] if the room does not exist, or a
    /// storage error.
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn get_state(
        &self,
        principal: &Principal,
        room_id: RoomId,
    ) -> Result<DeviceState, HotelError> {
        self.gate(principal, room_id).await?;
        self.device_states.get_or_create(room_id, now()).await
    }

    /// Switch the light of a room.
    ///
    /// # Errors
    ///
    /// Same as [`get_state`](Self::get_state).
    pub async fn set_light(
        &self,
        principal: &Principal,
        room_id: RoomId,
        power: Power,
    ) -> Result<DeviceState, HotelError> {
        self.switch(principal, room_id, Appliance::Light, power)
            .await
    }

    /// Switch the air-conditioning of a room.
    ///
    /// # Errors
    ///
    /// Same as [`get_state`](Self::get_state).
    pub async fn set_ac(
        &self,
        principal: &Principal,
        room_id: RoomId,
        power: Power,
    ) -> Result<DeviceState, HotelError> {
        self.switch(principal, room_id, Appliance::AirConditioning, power)
            .await
    }

    /// Send the unlock command to a room's door.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Forbidden`] or [`HotelError::NotFound`] as for
    /// [`get_state`](Self::get_state), or [`HotelError::Actuator`] if the
    /// door does not respond.
    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    pub async fn unlock_door(&self, principal: &Principal, room_id: RoomId) -> Result<(), HotelError> {
        self.gate(principal, room_id).await?;
        self.door.unlock(room_id).await?;
        tracing::info!(room_id = %room_id, "door unlocked");
        Ok(())
    }

    #[tracing::instrument(skip(self, principal), fields(user_id = %principal.id))]
    async fn switch(
        &self,
        principal: &Principal,
        room_id: RoomId,
        appliance: Appliance,
        power: Power,
    ) -> Result<DeviceState, HotelError> {
        self.gate(principal, room_id).await?;
        self.device_states
            .set(room_id, appliance, power, now())
            .await
    }

    async fn gate(&self, principal: &Principal, room_id: RoomId) -> Result<(), HotelError> {
        self.access.require_room_control(principal, room_id).await?;
        if self.rooms.get_by_id(room_id).await?.is_none() {
            return Err(NotFoundError {
                entity: "Room",
                id: room_id.to_string(),
            }
            .into());
        }
        Ok(())
    }
}
