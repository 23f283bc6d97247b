//! Demo inventory created on first start.

use hotelhub_app::ports::RoomRepository;
use hotelhub_app::services::room_service::RoomService;
use hotelhub_domain::error::HotelError;
use hotelhub_domain::room::RoomSpec;

const BASE_FEATURES: [&str; 4] = ["WiFi", "TV", "Mini Bar", "Air Conditioning"];

fn demo_room(
    room_number: &str,
    floor: i32,
    price_per_night: f64,
    description: &str,
    extra: &[&str],
) -> RoomSpec {
    RoomSpec {
        room_number: room_number.to_string(),
        floor,
        price_per_night,
        description: description.to_string(),
        features: BASE_FEATURES
            .iter()
            .chain(extra)
            .map(|feature| (*feature).to_string())
            .collect(),
    }
}

/// The five rooms of the demo hotel.
#[must_use]
pub fn demo_rooms() -> Vec<RoomSpec> {
    vec![
        demo_room(
            "101",
            1,
            100.0,
            "Standard room with queen bed, city view, and modern amenities.",
            &[],
        ),
        demo_room(
            "102",
            1,
            120.0,
            "Deluxe room with king bed, park view, and premium amenities.",
            &["Coffee Machine"],
        ),
        demo_room(
            "201",
            2,
            150.0,
            "Suite with separate living area, bedroom with king bed, and luxury amenities.",
            &["Coffee Machine", "Work Desk"],
        ),
        demo_room(
            "202",
            2,
            180.0,
            "Premium suite with balcony, city view, king bed, and all premium amenities.",
            &["Coffee Machine", "Work Desk", "Balcony"],
        ),
        demo_room(
            "301",
            3,
            250.0,
            "Executive suite with separate bedroom, living room, dining area, and premium amenities.",
            &["Coffee Machine", "Work Desk", "Balcony", "Jacuzzi"],
        ),
    ]
}

/// Create the demo rooms unless the registry already holds rooms.
///
/// Returns how many rooms were created.
///
/// # Errors
///
/// Returns any error raised while listing or creating rooms.
pub async fn seed_demo_rooms<RR: RoomRepository>(
    rooms: &RoomService<RR>,
) -> Result<usize, HotelError> {
    if !rooms.list_rooms().await?.is_empty() {
        tracing::debug!("registry not empty, skipping demo rooms");
        return Ok(0);
    }
    let specs = demo_rooms();
    let count = specs.len();
    for spec in specs {
        rooms.create_room(spec).await?;
    }
    tracing::info!(count, "demo rooms created");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotelhub_adapter_storage_sqlite_sqlx::{Config, SqliteRoomRepository};

    async fn service() -> RoomService<SqliteRoomRepository> {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        RoomService::new(SqliteRoomRepository::new(db.pool().clone()))
    }

    #[test]
    fn should_describe_five_valid_rooms() {
        let specs = demo_rooms();
        assert_eq!(specs.len(), 5);
        for spec in &specs {
            assert!(spec.validate().is_ok());
        }
        let suite = specs.iter().find(|s| s.room_number == "301").unwrap();
        assert_eq!(suite.features.len(), 8);
        assert!(suite.features.contains("Jacuzzi"));
    }

    #[tokio::test]
    async fn should_seed_empty_registry_once() {
        let rooms = service().await;

        assert_eq!(seed_demo_rooms(&rooms).await.unwrap(), 5);
        assert_eq!(seed_demo_rooms(&rooms).await.unwrap(), 0);
        assert_eq!(rooms.list_rooms().await.unwrap().len(), 5);
    }
}
