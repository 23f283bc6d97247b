//! # hotelhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a JSON API for rooms, bookings and in-room controls
//!   (`/api/rooms`, `/api/bookings`, `/api/room-status/{room_id}`, …)
//! - Turn the `Authorization: Bearer` header into a
//!   [`Principal`](hotelhub_domain::principal::Principal) through the
//!   identity port
//! - Map application errors onto HTTP status codes
//!
//! ## Dependency rule
//! Depends on `hotelhub-app` (for port traits and services) and
//! `hotelhub-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod router;
pub mod state;
