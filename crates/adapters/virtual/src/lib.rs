//! # hotelhub-adapter-virtual
//!
//! Virtual/demo integration standing in for hardware and identity providers
//! during development and testing.
//!
//! ## Provided adapters
//!
//! | Adapter | Port | Behaviour |
//! |---------|------|-----------|
//! | [`VirtualDoorLock`] | `DoorActuator` | Records every unlock; selected rooms can be jammed |
//! | [`StaticTokenResolver`] | `PrincipalResolver` | Looks bearer tokens up in a fixed table |
//!
//! ## Dependency rule
//!
//! Depends on `hotelhub-app` (port traits) and `hotelhub-domain` only.

mod door;
mod identity;

pub use door::{DoorError, UnlockRecord, VirtualDoorLock};
pub use identity::StaticTokenResolver;
