//! End-to-end smoke tests for the full hotelhubd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot` — no TCP port is bound.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{DateTime, Duration, Utc};
use http_body_util::BodyExt;
use hotelhub_adapter_http_axum::router;
use hotelhub_adapter_http_axum::state::AppState;
use hotelhub_adapter_storage_sqlite_sqlx::{
    Config, SqliteBookingRepository, SqliteDeviceStateRepository, SqliteRoomRepository,
};
use hotelhub_adapter_virtual::{StaticTokenResolver, VirtualDoorLock};
use hotelhub_app::services::booking_service::BookingService;
use hotelhub_app::services::room_control_service::RoomControlService;
use hotelhub_app::services::room_service::RoomService;
use hotelhub_domain::id::UserId;
use hotelhub_domain::principal::Principal;
use serde_json::{Value, json};
use tower::ServiceExt;

const ADMIN: &str = "front-desk";
const ALICE: &str = "alice";
const BOB: &str = "bob";

struct TestApp {
    router: axum::Router,
    door: Arc<VirtualDoorLock>,
}

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> TestApp {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");
    let pool = db.pool().clone();

    let room_repo = Arc::new(SqliteRoomRepository::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(pool.clone()));
    let state_repo = Arc::new(SqliteDeviceStateRepository::new(pool));
    let door = Arc::new(VirtualDoorLock::default());
    let principals = StaticTokenResolver::default()
        .with_token(ADMIN, Principal::admin(UserId::new()))
        .with_token(ALICE, Principal::guest(UserId::new()))
        .with_token(BOB, Principal::guest(UserId::new()));

    let state = AppState::new(
        RoomService::new(Arc::clone(&room_repo)),
        BookingService::new(Arc::clone(&room_repo), Arc::clone(&booking_repo)),
        RoomControlService::new(room_repo, booking_repo, state_repo, Arc::clone(&door)),
        principals,
    );

    TestApp {
        router: router::build(state),
        door,
    }
}

impl TestApp {
    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(value) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn create_room(&self, room_number: &str, price: f64) -> String {
        let (status, room) = self
            .call(
                Method::POST,
                "/api/rooms",
                Some(ADMIN),
                Some(json!({
                    "room_number": room_number,
                    "floor": 1,
                    "price_per_night": price,
                    "description": "Standard room with queen bed",
                    "features": ["WiFi"],
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        room["id"].as_str().unwrap().to_string()
    }

    async fn book(
        &self,
        token: &str,
        room_id: &str,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> (StatusCode, Value) {
        self.call(
            Method::POST,
            "/api/bookings",
            Some(token),
            Some(json!({
                "room_id": room_id,
                "check_in_date": check_in.to_rfc3339(),
                "check_out_date": check_out.to_rfc3339(),
            })),
        )
        .await
    }

    async fn room_status(&self, room_id: &str) -> Value {
        let (_, room) = self
            .call(Method::GET, &format!("/api/rooms/{room_id}"), None, None)
            .await;
        room["status"].clone()
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let resp = app()
        .await
        .router
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Guest stay, start to finish
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_walk_guest_through_booking_control_and_cancellation() {
    let app = app().await;
    let room_id = app.create_room("101", 100.0).await;
    let now = Utc::now();

    let (status, booking) = app
        .book(ALICE, &room_id, now - Duration::hours(2), now + Duration::days(2))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(booking["status"], "active");
    assert!((booking["amount"].as_f64().unwrap() - 300.0).abs() < f64::EPSILON);
    assert_eq!(app.room_status(&room_id).await, "occupied");

    // Alice controls her room during the stay.
    let (status, state) = app
        .call(
            Method::PUT,
            &format!("/api/room-status/{room_id}/ac"),
            Some(ALICE),
            Some(json!({ "state": "on" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["ac"], "on");
    assert_eq!(state["light"], "off");

    let unlock = format!("/api/door-control/{room_id}/unlock");
    let (status, _) = app.call(Method::POST, &unlock, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.door.history().await.len(), 1);

    // Bob does not.
    let (status, _) = app.call(Method::POST, &unlock, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .call(
            Method::GET,
            &format!("/api/room-status/{room_id}"),
            Some(BOB),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(app.door.history().await.len(), 1);

    // Bob cannot cancel Alice's booking.
    let cancel = format!("/api/bookings/{}/cancel", booking["id"].as_str().unwrap());
    let (status, _) = app.call(Method::PUT, &cancel, Some(BOB), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Alice cancels; the room frees up and her access ends.
    let (status, cancelled) = app.call(Method::PUT, &cancel, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["status"], "cancelled");
    assert_eq!(app.room_status(&room_id).await, "available");

    let (status, _) = app.call(Method::POST, &unlock, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Bob can now book the same dates.
    let (status, _) = app
        .book(BOB, &room_id, now - Duration::hours(2), now + Duration::days(2))
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn should_deny_control_before_stay_starts() {
    let app = app().await;
    let room_id = app.create_room("102", 120.0).await;
    let now = Utc::now();

    let (status, _) = app
        .book(ALICE, &room_id, now + Duration::days(3), now + Duration::days(5))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/room-status/{room_id}/light"),
            Some(ALICE),
            Some(json!({ "state": "on" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_complete_booking_as_admin_only() {
    let app = app().await;
    let room_id = app.create_room("201", 150.0).await;
    let now = Utc::now();
    let (_, booking) = app
        .book(ALICE, &room_id, now - Duration::days(2), now + Duration::hours(1))
        .await;
    let complete = format!("/api/bookings/{}/complete", booking["id"].as_str().unwrap());

    let (status, _) = app.call(Method::PUT, &complete, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, completed) = app.call(Method::PUT, &complete, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["status"], "completed");
    assert_eq!(app.room_status(&room_id).await, "available");

    let cancel = format!("/api/bookings/{}/cancel", booking["id"].as_str().unwrap());
    let (status, _) = app.call(Method::PUT, &cancel, Some(ALICE), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_list_bookings_per_principal() {
    let app = app().await;
    let first = app.create_room("101", 100.0).await;
    let second = app.create_room("102", 120.0).await;
    let now = Utc::now();
    app.book(ALICE, &first, now + Duration::days(1), now + Duration::days(2))
        .await;
    app.book(BOB, &second, now + Duration::days(1), now + Duration::days(2))
        .await;

    let (_, mine) = app.call(Method::GET, "/api/bookings", Some(ALICE), None).await;
    assert_eq!(mine.as_array().unwrap().len(), 1);
    let (_, all) = app.call(Method::GET, "/api/bookings", Some(ADMIN), None).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_admit_exactly_one_of_concurrent_overlapping_bookings() {
    let app = app().await;
    let room_id = app.create_room("301", 250.0).await;
    let check_in = Utc::now() + Duration::days(10);
    let check_out = check_in + Duration::days(3);

    let (a, b) = tokio::join!(
        app.book(ALICE, &room_id, check_in, check_out),
        app.book(BOB, &room_id, check_in + Duration::days(1), check_out),
    );

    let mut statuses = [a.0, b.0];
    statuses.sort_by_key(StatusCode::as_u16);
    assert_eq!(
        statuses,
        [StatusCode::CREATED, StatusCode::CONFLICT],
        "one booking wins, the other sees its stay"
    );

    let (_, all) = app.call(Method::GET, "/api/bookings", Some(ADMIN), None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_admit_exactly_one_of_concurrent_disjoint_bookings() {
    let app = app().await;
    let room_id = app.create_room("302", 250.0).await;
    let now = Utc::now();

    let (a, b) = tokio::join!(
        app.book(ALICE, &room_id, now + Duration::days(10), now + Duration::days(12)),
        app.book(BOB, &room_id, now + Duration::days(30), now + Duration::days(32)),
    );

    let mut statuses = [a.0, b.0];
    statuses.sort_by_key(StatusCode::as_u16);
    assert_eq!(
        statuses,
        [StatusCode::CREATED, StatusCode::BAD_REQUEST],
        "the room holds one booking at a time"
    );
    assert_eq!(app.room_status(&room_id).await, "occupied");

    let (_, all) = app.call(Method::GET, "/api/bookings", Some(ADMIN), None).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_refuse_booking_for_room_under_maintenance() {
    let app = app().await;
    let room_id = app.create_room("202", 180.0).await;
    let (status, _) = app
        .call(
            Method::PUT,
            &format!("/api/rooms/{room_id}/status"),
            Some(ADMIN),
            Some(json!({ "status": "maintenance" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let now = Utc::now();
    let (status, body) = app
        .book(ALICE, &room_id, now + Duration::days(1), now + Duration::days(2))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("maintenance"));
}

#[tokio::test]
async fn should_keep_room_number_on_update() {
    let app = app().await;
    let room_id = app.create_room("101", 100.0).await;
    let uri = format!("/api/rooms/{room_id}");

    let (status, room) = app
        .call(
            Method::PUT,
            &uri,
            Some(ADMIN),
            Some(json!({
                "room_number": "101",
                "floor": 1,
                "price_per_night": 110.0,
                "description": "Refurbished",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room["description"], "Refurbished");
    assert_eq!(room["status"], "available");

    let (status, _) = app
        .call(
            Method::PUT,
            &uri,
            Some(ADMIN),
            Some(json!({
                "room_number": "999",
                "floor": 1,
                "price_per_night": 110.0,
                "description": "Renamed",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
