//! # hotelhubd — hotelhub daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialize logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;
mod seed;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hotelhub_adapter_http_axum::state::AppState;
use hotelhub_adapter_storage_sqlite_sqlx::{
    SqliteBookingRepository, SqliteDeviceStateRepository, SqliteRoomRepository,
};
use hotelhub_adapter_virtual::{StaticTokenResolver, VirtualDoorLock};
use hotelhub_app::services::booking_service::BookingService;
use hotelhub_app::services::room_control_service::RoomControlService;
use hotelhub_app::services::room_service::RoomService;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Database
    let db = hotelhub_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let room_repo = Arc::new(SqliteRoomRepository::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepository::new(pool.clone()));
    let device_state_repo = Arc::new(SqliteDeviceStateRepository::new(pool));

    // Identity and hardware
    let principals: StaticTokenResolver = config
        .identity
        .tokens
        .iter()
        .map(|grant| (grant.token.clone(), grant.principal()))
        .collect();
    if principals.is_empty() {
        tracing::warn!("no identity tokens configured, authenticated endpoints will reject every request");
    }
    let door = VirtualDoorLock::default();

    // Services
    let room_service = RoomService::new(Arc::clone(&room_repo));
    let booking_service = BookingService::new(Arc::clone(&room_repo), Arc::clone(&booking_repo));
    let room_control =
        RoomControlService::new(room_repo, booking_repo, device_state_repo, door);

    if config.seed.demo_rooms {
        seed::seed_demo_rooms(&room_service).await?;
    }

    // HTTP
    let state = AppState::new(room_service, booking_service, room_control, principals);
    let app = hotelhub_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "hotelhubd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("hotelhubd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
