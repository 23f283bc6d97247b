//! Booking — a time-bounded stay in a room, owned by a user.
//!
//! The lifecycle is a forward-only state machine:
//!
//! ```text
//! Pending ──► Active ──► Completed
//!    │           │
//!    └───────────┴─────► Cancelled
//! ```
//!
//! Only [`BookingStatus::Active`] bookings take part in overlap detection
//! and room-control authorization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{StateError, ValidationError};
use crate::id::{BookingId, RoomId, UserId};
use crate::room::Room;
use crate::time::Timestamp;

const SECONDS_PER_DAY: i64 = 86_400;

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Whether `self → next` is a legal forward transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active | Self::Cancelled)
                | (Self::Active, Self::Cancelled | Self::Completed)
        )
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown booking status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown booking status: {0}")]
pub struct ParseBookingStatusError(String);

impl FromStr for BookingStatus {
    type Err = ParseBookingStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            other => Err(ParseBookingStatusError(other.to_string())),
        }
    }
}

/// Payment state carried alongside a booking. Never driven by this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Refunded => "refunded",
        }
    }
}

/// Error returned when parsing an unknown payment status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown payment status: {0}")]
pub struct ParsePaymentStatusError(String);

impl FromStr for PaymentStatus {
    type Err = ParsePaymentStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "refunded" => Ok(Self::Refunded),
            other => Err(ParsePaymentStatusError(other.to_string())),
        }
    }
}

/// Closed interval `[check_in, check_out]` with `check_out > check_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayWindow {
    check_in: Timestamp,
    check_out: Timestamp,
}

impl StayWindow {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStayWindow`] unless
    /// `check_out > check_in`.
    pub fn new(check_in: Timestamp, check_out: Timestamp) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError::InvalidStayWindow);
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    #[must_use]
    pub fn check_in(&self) -> Timestamp {
        self.check_in
    }

    #[must_use]
    pub fn check_out(&self) -> Timestamp {
        self.check_out
    }

    /// Inclusive-bound intersection: touching endpoints count as overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.check_in <= other.check_out && other.check_in <= self.check_out
    }

    /// Whether `at` lies within the window, bounds included.
    #[must_use]
    pub fn covers(&self, at: Timestamp) -> bool {
        self.check_in <= at && at <= self.check_out
    }

    /// Billable nights: the stay length in days, rounded up, at least one.
    #[must_use]
    pub fn nights(&self) -> i64 {
        let seconds = (self.check_out - self.check_in).num_seconds();
        ((seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY).max(1)
    }
}

/// A reservation of a room by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in_date: Timestamp,
    pub check_out_date: Timestamp,
    pub created_at: Timestamp,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub amount: f64,
}

impl Booking {
    /// Admit a new stay in `room` for `user_id`.
    ///
    /// The booking is immediately [`BookingStatus::Active`] and priced at
    /// `price_per_night × nights`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn admit(room: &Room, user_id: UserId, window: StayWindow, at: Timestamp) -> Self {
        Self {
            id: BookingId::new(),
            room_id: room.id,
            user_id,
            check_in_date: window.check_in,
            check_out_date: window.check_out,
            created_at: at,
            status: BookingStatus::Active,
            payment_status: PaymentStatus::Pending,
            amount: room.price_per_night * window.nights() as f64,
        }
    }

    #[must_use]
    pub fn window(&self) -> StayWindow {
        StayWindow {
            check_in: self.check_in_date,
            check_out: self.check_out_date,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Whether this booking blocks admission of `window`.
    #[must_use]
    pub fn conflicts_with(&self, window: &StayWindow) -> bool {
        self.is_active() && self.window().overlaps(window)
    }

    /// Whether this booking lets `user_id` control its room at `at`.
    #[must_use]
    pub fn grants_access(&self, user_id: UserId, at: Timestamp) -> bool {
        self.is_active() && self.is_owned_by(user_id) && self.window().covers(at)
    }

    /// Move to `next`, enforcing the forward-only lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidTransition`] for any illegal move.
    pub fn transition(&mut self, next: BookingStatus) -> Result<(), StateError> {
        if !self.status.can_transition_to(next) {
            return Err(StateError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
