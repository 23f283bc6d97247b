//! Storage-specific error type wrapping sqlx errors.

use hotelhub_domain::error::HotelError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize or deserialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for HotelError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Decode a stored text column into a domain value.
pub(crate) fn decode<T, E>(value: Result<T, E>) -> Result<T, sqlx::Error>
where
    E: std::error::Error + Send + Sync + 'static,
{
    value.map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Parse an rfc3339 timestamp column.
pub(crate) fn decode_timestamp(value: &str) -> Result<chrono::DateTime<chrono::Utc>, sqlx::Error> {
    decode(chrono::DateTime::parse_from_rfc3339(value)).map(|ts| ts.to_utc())
}
