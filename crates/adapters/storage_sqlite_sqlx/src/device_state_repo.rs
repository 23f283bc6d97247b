//! `SQLite` implementation of [`DeviceStateRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hotelhub_app::ports::DeviceStateRepository;
use hotelhub_domain::device_state::{Appliance, DeviceState, Power};
use hotelhub_domain::error::HotelError;
use hotelhub_domain::id::RoomId;
use hotelhub_domain::time::Timestamp;

use crate::error::{StorageError, decode, decode_timestamp};

/// Wrapper for converting database rows into domain [`DeviceState`].
struct Wrapper(DeviceState);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let room_id: String = row.try_get("room_id")?;
        let light: String = row.try_get("light")?;
        let ac: String = row.try_get("ac")?;
        let last_updated: String = row.try_get("last_updated")?;

        Ok(Self(DeviceState {
            room_id: decode(RoomId::from_str(&room_id))?,
            light: decode(Power::from_str(&light))?,
            ac: decode(Power::from_str(&ac))?,
            last_updated: decode_timestamp(&last_updated)?,
        }))
    }
}

const INSERT_DEFAULT: &str = r"
    INSERT INTO room_status (room_id, light, ac, last_updated) VALUES (?, ?, ?, ?)
    ON CONFLICT(room_id) DO NOTHING
";
const SELECT_BY_ROOM: &str = "SELECT * FROM room_status WHERE room_id = ?";
const UPSERT_LIGHT: &str = r"
    INSERT INTO room_status (room_id, light, ac, last_updated) VALUES (?, ?, ?, ?)
    ON CONFLICT(room_id) DO UPDATE SET light = excluded.light, last_updated = excluded.last_updated
    RETURNING *
";
const UPSERT_AC: &str = r"
    INSERT INTO room_status (room_id, light, ac, last_updated) VALUES (?, ?, ?, ?)
    ON CONFLICT(room_id) DO UPDATE SET ac = excluded.ac, last_updated = excluded.last_updated
    RETURNING *
";

/// `SQLite`-backed per-room light/AC state.
pub struct SqliteDeviceStateRepository {
    pool: SqlitePool,
}

impl SqliteDeviceStateRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceStateRepository for SqliteDeviceStateRepository {
    fn get_or_create(
        &self,
        room_id: RoomId,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let default = DeviceState::new(room_id, at);
            sqlx::query(INSERT_DEFAULT)
                .bind(room_id.to_string())
                .bind(default.light.as_str())
                .bind(default.ac.as_str())
                .bind(at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            let row: Wrapper = sqlx::query_as(SELECT_BY_ROOM)
                .bind(room_id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.0)
        }
    }

    fn set(
        &self,
        room_id: RoomId,
        appliance: Appliance,
        power: Power,
        at: Timestamp,
    ) -> impl Future<Output = Result<DeviceState, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            // Values used only when the row does not exist yet.
            let mut fresh = DeviceState::new(room_id, at);
            fresh.set(appliance, power, at);
            let query = match appliance {
                Appliance::Light => UPSERT_LIGHT,
                Appliance::AirConditioning => UPSERT_AC,
            };

            let row: Wrapper = sqlx::query_as(query)
                .bind(room_id.to_string())
                .bind(fresh.light.as_str())
                .bind(fresh.ac.as_str())
                .bind(at.to_rfc3339())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            tracing::debug!(room_id = %room_id, ?appliance, %power, "device state written");
            Ok(row.0)
        }
    }
}
