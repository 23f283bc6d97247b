//! `SQLite` implementation of [`RoomRepository`].
//!
//! A room and its default light/AC row are inserted in one transaction.

use std::collections::BTreeSet;
use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hotelhub_app::ports::RoomRepository;
use hotelhub_domain::device_state::DeviceState;
use hotelhub_domain::error::{ConflictError, HotelError, NotFoundError};
use hotelhub_domain::id::RoomId;
use hotelhub_domain::room::{Room, RoomStatus};
use hotelhub_domain::time::now;

use crate::error::{StorageError, decode};

/// Wrapper for converting database rows into domain [`Room`].
struct Wrapper(Room);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Room> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let room_number: String = row.try_get("room_number")?;
        let floor: i32 = row.try_get("floor")?;
        let price_per_night: f64 = row.try_get("price_per_night")?;
        let description: String = row.try_get("description")?;
        let status: String = row.try_get("status")?;
        let features: String = row.try_get("features")?;

        let features: BTreeSet<String> = decode(serde_json::from_str(&features))?;

        Ok(Self(Room {
            id: decode(RoomId::from_str(&id))?,
            room_number,
            floor,
            price_per_night,
            description,
            status: decode(RoomStatus::from_str(&status))?,
            features,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO rooms (id, room_number, floor, price_per_night, description, status, features)
    VALUES (?, ?, ?, ?, ?, ?, ?)
";
const INSERT_DEVICE_STATE: &str = r"
    INSERT INTO room_status (room_id, light, ac, last_updated) VALUES (?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM rooms WHERE id = ?";
const SELECT_BY_NUMBER: &str = "SELECT * FROM rooms WHERE room_number = ?";
const SELECT_ALL: &str = "SELECT * FROM rooms ORDER BY room_number LIMIT ?";
const UPDATE: &str = r"
    UPDATE rooms SET floor = ?, price_per_night = ?, description = ?, features = ?
    WHERE id = ?
    RETURNING *
";
const UPDATE_STATUS: &str = "UPDATE rooms SET status = ? WHERE id = ? RETURNING *";

/// `SQLite`-backed room repository.
pub struct SqliteRoomRepository {
    pool: SqlitePool,
}

impl SqliteRoomRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RoomRepository for SqliteRoomRepository {
    fn create(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let features = serde_json::to_string(&room.features).map_err(StorageError::from)?;
            let state = DeviceState::new(room.id, now());
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let result = sqlx::query(INSERT)
                .bind(room.id.to_string())
                .bind(&room.room_number)
                .bind(room.floor)
                .bind(room.price_per_night)
                .bind(&room.description)
                .bind(room.status.as_str())
                .bind(features)
                .execute(&mut *tx)
                .await;
            match result {
                Ok(_) => {}
                Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                    tx.rollback().await.map_err(StorageError::from)?;
                    return Err(ConflictError::DuplicateRoomNumber {
                        room_number: room.room_number,
                    }
                    .into());
                }
                Err(err) => return Err(StorageError::from(err).into()),
            }

            sqlx::query(INSERT_DEVICE_STATE)
                .bind(state.room_id.to_string())
                .bind(state.light.as_str())
                .bind(state.ac.as_str())
                .bind(state.last_updated.to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(room)
        }
    }

    fn get_by_id(
        &self,
        id: RoomId,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_by_number(
        &self,
        room_number: &str,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let pool = self.pool.clone();
        let room_number = room_number.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NUMBER)
                .bind(room_number)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self, limit: usize) -> impl Future<Output = Result<Vec<Room>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .bind(i64::try_from(limit).unwrap_or(i64::MAX))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, room: Room) -> impl Future<Output = Result<Room, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let features = serde_json::to_string(&room.features).map_err(StorageError::from)?;
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(room.floor)
                .bind(room.price_per_night)
                .bind(&room.description)
                .bind(features)
                .bind(room.id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Wrapper::maybe(row).ok_or_else(|| {
                NotFoundError {
                    entity: "Room",
                    id: room.id.to_string(),
                }
                .into()
            })
        }
    }

    fn set_status(
        &self,
        id: RoomId,
        status: RoomStatus,
    ) -> impl Future<Output = Result<Option<Room>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE_STATUS)
                .bind(status.as_str())
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }
}
