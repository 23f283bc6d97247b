//! # hotelhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RoomRepository` — room inventory and status
//!   - `BookingRepository` — bookings, with transactional room-status pairing
//!   - `DeviceStateRepository` — find-or-create and upsert of per-room switches
//!   - `PrincipalResolver` — credential → principal (identity provider)
//!   - `DoorActuator` — the door-unlock command channel
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RoomService` — the room registry
//!   - `BookingService` — booking admission, cancellation, completion
//!   - `RoomAccess` — the single room-control authorization predicate
//!   - `RoomControlService` — gated device state and door unlock
//! - Provide **in-process infrastructure** (per-room locks) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `hotelhub-domain` only (plus `tokio::sync` for locks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod locks;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
