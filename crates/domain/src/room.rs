//! Room — a bookable unit of hotel inventory.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HotelError, ValidationError};
use crate::id::RoomId;

/// Coarse operational status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
    Cleaning,
}

impl RoomStatus {
    /// Whether a new booking may be admitted against a room in this status.
    #[must_use]
    pub fn accepts_bookings(self) -> bool {
        matches!(self, Self::Available)
    }

    /// Whether an administrator has taken the room out of service, as
    /// opposed to a booking holding it.
    #[must_use]
    pub fn is_out_of_service(self) -> bool {
        matches!(self, Self::Maintenance | Self::Cleaning)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
            Self::Cleaning => "cleaning",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown room status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown room status: {0}")]
pub struct ParseRoomStatusError(String);

impl FromStr for RoomStatus {
    type Err = ParseRoomStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            "cleaning" => Ok(Self::Cleaning),
            other => Err(ParseRoomStatusError(other.to_string())),
        }
    }
}

/// A hotel room.
///
/// `room_number` is unique across the registry and never changes after
/// creation. `status` is owned by the booking ledger (occupied / available)
/// and by administrators (maintenance / cleaning).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub floor: i32,
    pub price_per_night: f64,
    pub description: String,
    pub status: RoomStatus,
    pub features: BTreeSet<String>,
}

/// The caller-supplied, mutable description of a room.
///
/// Used both for creation and for full replacement on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub room_number: String,
    pub floor: i32,
    pub price_per_night: f64,
    pub description: String,
    #[serde(default)]
    pub features: BTreeSet<String>,
}

impl RoomSpec {
    /// Check domain invariants on the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRoomNumber`] or
    /// [`ValidationError::InvalidPrice`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.room_number.trim().is_empty() {
            return Err(ValidationError::EmptyRoomNumber);
        }
        if !self.price_per_night.is_finite() || self.price_per_night < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(())
    }
}

impl Room {
    /// Create a builder for constructing a [`Room`].
    #[must_use]
    pub fn builder() -> RoomBuilder {
        RoomBuilder::default()
    }

    /// Build a fresh, available room from a validated spec.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Validation`] when the spec is invalid.
    pub fn from_spec(spec: RoomSpec) -> Result<Self, HotelError> {
        Self::builder()
            .room_number(spec.room_number)
            .floor(spec.floor)
            .price_per_night(spec.price_per_night)
            .description(spec.description)
            .features(spec.features)
            .build()
    }

    /// Replace every mutable field with the values from `spec`, keeping the
    /// id and the current status.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RoomNumberImmutable`] when `spec` tries to
    /// rename the room, or any other validation failure of `spec`.
    pub fn apply(&mut self, spec: RoomSpec) -> Result<(), ValidationError> {
        spec.validate()?;
        if spec.room_number != self.room_number {
            return Err(ValidationError::RoomNumberImmutable);
        }
        self.floor = spec.floor;
        self.price_per_night = spec.price_per_night;
        self.description = spec.description;
        self.features = spec.features;
        Ok(())
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Validation`] when `room_number` is empty or the
    /// price is negative or not finite.
    pub fn validate(&self) -> Result<(), HotelError> {
        if self.room_number.trim().is_empty() {
            return Err(ValidationError::EmptyRoomNumber.into());
        }
        if !self.price_per_night.is_finite() || self.price_per_night < 0.0 {
            return Err(ValidationError::InvalidPrice.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Room`].
#[derive(Debug, Default)]
pub struct RoomBuilder {
    id: Option<RoomId>,
    room_number: Option<String>,
    floor: i32,
    price_per_night: f64,
    description: String,
    status: RoomStatus,
    features: BTreeSet<String>,
}

impl RoomBuilder {
    #[must_use]
    pub fn id(mut self, id: RoomId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn room_number(mut self, room_number: impl Into<String>) -> Self {
        self.room_number = Some(room_number.into());
        self
    }

    #[must_use]
    pub fn floor(mut self, floor: i32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn price_per_night(mut self, price: f64) -> Self {
        self.price_per_night = price;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn status(mut self, status: RoomStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.features.insert(feature.into());
        self
    }

    #[must_use]
    pub fn features(mut self, features: impl IntoIterator<Item = String>) -> Self {
        self.features.extend(features);
        self
    }

    /// Consume the builder, validate, and return a [`Room`].
    ///
    /// # Errors
    ///
    /// Returns [`HotelError::Validation`] if `room_number` is missing or
    /// empty, or the price is invalid.
    pub fn build(self) -> Result<Room, HotelError> {
        let room = Room {
            id: self.id.unwrap_or_default(),
            room_number: self.room_number.unwrap_or_default(),
            floor: self.floor,
            price_per_night: self.price_per_night,
            description: self.description,
            status: self.status,
            features: self.features,
        };
        room.validate()?;
        Ok(room)
    }
}
