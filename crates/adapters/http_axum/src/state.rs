//! Shared application state for axum handlers.

use std::sync::Arc;

use hotelhub_app::services::booking_service::BookingService;
use hotelhub_app::services::room_control_service::RoomControlService;
use hotelhub_app::services::room_service::RoomService;

/// Application state shared across all axum handlers.
///
/// Generic over the room, booking and device-state repositories, the door
/// actuator and the principal resolver to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<RR, BR, DR, DA, PR> {
    /// Room registry.
    pub room_service: Arc<RoomService<RR>>,
    /// Booking ledger.
    pub booking_service: Arc<BookingService<RR, BR>>,
    /// Light, AC and door control behind the access check.
    pub room_control: Arc<RoomControlService<RR, BR, DR, DA>>,
    /// Resolves bearer credentials.
    pub principals: Arc<PR>,
}

impl<RR, BR, DR, DA, PR> Clone for AppState<RR, BR, DR, DA, PR> {
    fn clone(&self) -> Self {
        Self {
            room_service: Arc::clone(&self.room_service),
            booking_service: Arc::clone(&self.booking_service),
            room_control: Arc::clone(&self.room_control),
            principals: Arc::clone(&self.principals),
        }
    }
}

impl<RR, BR, DR, DA, PR> AppState<RR, BR, DR, DA, PR> {
    /// Create a new application state from service instances.
    pub fn new(
        room_service: RoomService<RR>,
        booking_service: BookingService<RR, BR>,
        room_control: RoomControlService<RR, BR, DR, DA>,
        principals: PR,
    ) -> Self {
        Self {
            room_service: Arc::new(room_service),
            booking_service: Arc::new(booking_service),
            room_control: Arc::new(room_control),
            principals: Arc::new(principals),
        }
    }
}
