//! `SQLite` implementation of [`BookingRepository`].
//!
//! `admit` and `transition` write the booking and its room's status inside
//! one transaction, and `admit` only takes a room that is still available.
//! Every statement in a transaction runs on `&mut *tx`; going back to the
//! pool would wait on the connection the transaction holds.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use hotelhub_app::ports::{BookingRepository, RoomStatusChange};
use hotelhub_domain::booking::{Booking, BookingStatus, PaymentStatus};
use hotelhub_domain::error::HotelError;
use hotelhub_domain::id::{BookingId, RoomId, UserId};
use hotelhub_domain::room::RoomStatus;

use crate::error::{StorageError, decode, decode_timestamp};

/// Wrapper for converting database rows into domain [`Booking`].
struct Wrapper(Booking);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Booking> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let room_id: String = row.try_get("room_id")?;
        let user_id: String = row.try_get("user_id")?;
        let check_in_date: String = row.try_get("check_in_date")?;
        let check_out_date: String = row.try_get("check_out_date")?;
        let created_at: String = row.try_get("created_at")?;
        let status: String = row.try_get("status")?;
        let payment_status: String = row.try_get("payment_status")?;
        let amount: f64 = row.try_get("amount")?;

        Ok(Self(Booking {
            id: decode(BookingId::from_str(&id))?,
            room_id: decode(RoomId::from_str(&room_id))?,
            user_id: decode(UserId::from_str(&user_id))?,
            check_in_date: decode_timestamp(&check_in_date)?,
            check_out_date: decode_timestamp(&check_out_date)?,
            created_at: decode_timestamp(&created_at)?,
            status: decode(BookingStatus::from_str(&status))?,
            payment_status: decode(PaymentStatus::from_str(&payment_status))?,
            amount,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO bookings
        (id, room_id, user_id, check_in_date, check_out_date, created_at, status, payment_status, amount)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";
const UPDATE_STATUS_IF: &str = "UPDATE bookings SET status = ? WHERE id = ? AND status = ?";
const UPDATE_ROOM_STATUS: &str = "UPDATE rooms SET status = ? WHERE id = ?";
const OCCUPY_ROOM_IF_AVAILABLE: &str = "UPDATE rooms SET status = ? WHERE id = ? AND status = ?";
const SELECT_BY_ID: &str = "SELECT * FROM bookings WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM bookings ORDER BY created_at DESC LIMIT ?";
const SELECT_BY_USER: &str =
    "SELECT * FROM bookings WHERE user_id = ? ORDER BY created_at DESC LIMIT ?";
const SELECT_BY_ROOM_AND_STATUS: &str = "SELECT * FROM bookings WHERE room_id = ? AND status = ?";

/// `SQLite`-backed booking repository.
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

impl BookingRepository for SqliteBookingRepository {
    fn admit(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let occupied = sqlx::query(OCCUPY_ROOM_IF_AVAILABLE)
                .bind(RoomStatus::Occupied.as_str())
                .bind(booking.room_id.to_string())
                .bind(RoomStatus::Available.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if occupied.rows_affected() == 0 {
                tx.rollback().await.map_err(StorageError::from)?;
                return Ok(None);
            }

            sqlx::query(INSERT)
                .bind(booking.id.to_string())
                .bind(booking.room_id.to_string())
                .bind(booking.user_id.to_string())
                .bind(booking.check_in_date.to_rfc3339())
                .bind(booking.check_out_date.to_rfc3339())
                .bind(booking.created_at.to_rfc3339())
                .bind(booking.status.as_str())
                .bind(booking.payment_status.as_str())
                .bind(booking.amount)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(Some(booking))
        }
    }

    fn transition(
        &self,
        id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
        room: Option<RoomStatusChange>,
    ) -> impl Future<Output = Result<bool, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let result = sqlx::query(UPDATE_STATUS_IF)
                .bind(to.as_str())
                .bind(id.to_string())
                .bind(from.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                tx.rollback().await.map_err(StorageError::from)?;
                return Ok(false);
            }

            if let Some(change) = room {
                sqlx::query(UPDATE_ROOM_STATUS)
                    .bind(change.status.as_str())
                    .bind(change.room_id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(true)
        }
    }

    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, HotelError>> + Send {
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

    fn get_all(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .bind(sql_limit(limit))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_user(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.to_string())
                .bind(sql_limit(limit))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_active_by_room(
        &self,
        room_id: RoomId,
    ) -> impl Future<Output = Result<Vec<Booking>, HotelError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_ROOM_AND_STATUS)
                .bind(room_id.to_string())
                .bind(BookingStatus::Active.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
