//! Application services — use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod booking_service;
pub mod room_access;
pub mod room_control_service;
pub mod room_service;

/// Upper bound on list results. Larger result sets are silently truncated.
pub const LIST_LIMIT: usize = 1000;
