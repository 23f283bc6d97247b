//! # hotelhub-domain
//!
//! Pure domain model for the hotelhub room access system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Rooms** (inventory with a coarse operational status)
//! - Define **Bookings** (time-bounded stays with a forward-only lifecycle)
//! - Define **Device state** (per-room light / air-conditioning switches)
//! - Define **Principals** (authenticated actors with a role)
//! - Contain all invariant enforcement: stay-window overlap, lifecycle
//!   transitions, ownership checks
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod booking;
pub mod device_state;
pub mod principal;
pub mod room;
