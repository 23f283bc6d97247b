//! # hotelhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `hotelhub-app::ports::storage`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Booking writes that also move a room's status run in one transaction, so
//! a reader never sees a booking without its room update or the reverse.
//!
//! ## Dependency rule
//! Depends on `hotelhub-app` (for port traits) and `hotelhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod booking_repo;
mod device_state_repo;
mod error;
mod pool;
mod room_repo;

pub use booking_repo::SqliteBookingRepository;
pub use device_state_repo::SqliteDeviceStateRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use room_repo::SqliteRoomRepository;
