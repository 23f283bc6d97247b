//! Actuator port — the command channel to room hardware.

use std::future::Future;

use hotelhub_domain::error::HotelError;
use hotelhub_domain::id::RoomId;

/// Sends the unlock command to a room's door.
///
/// Callers are responsible for authorization; an actuator executes whatever
/// it is handed.
pub trait DoorActuator {
    /// Unlock the door of `room_id`.
    fn unlock(&self, room_id: RoomId) -> impl Future<Output = Result<(), HotelError>> + Send;
}

impl<T: DoorActuator + Send + Sync> DoorActuator for std::sync::Arc<T> {
    fn unlock(&self, room_id: RoomId) -> impl Future<Output = Result<(), HotelError>> + Send {
        (**self).unlock(room_id)
    }
}
