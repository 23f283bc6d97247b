//! Device state — the light and air-conditioning switches of a room.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::RoomId;
use crate::time::Timestamp;

/// On/off position of a room appliance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    #[default]
    Off,
}

impl Power {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown power value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown power value: {0}")]
pub struct ParsePowerError(String);

impl FromStr for Power {
    type Err = ParsePowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(ParsePowerError(other.to_string())),
        }
    }
}

/// Which appliance a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appliance {
    Light,
    AirConditioning,
}

/// Current device state of a single room. Exactly one exists per room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub room_id: RoomId,
    pub light: Power,
    pub ac: Power,
    pub last_updated: Timestamp,
}

impl DeviceState {
    /// Everything off.
    #[must_use]
    pub fn new(room_id: RoomId, at: Timestamp) -> Self {
        Self {
            room_id,
            light: Power::Off,
            ac: Power::Off,
            last_updated: at,
        }
    }

    /// Set one appliance, leaving the other untouched.
    pub fn set(&mut self, appliance: Appliance, power: Power, at: Timestamp) {
        match appliance {
            Appliance::Light => self.light = power,
            Appliance::AirConditioning => self.ac = power,
        }
        self.last_updated = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::now;

    #[test]
    fn should_default_to_everything_off() {
        let state = DeviceState::new(RoomId::new(), now());
        assert_eq!(state.light, Power::Off);
        assert_eq!(state.ac, Power::Off);
    }

    #[test]
    fn should_preserve_other_appliance_when_setting_one() {
        let created = now();
        let mut state = DeviceState::new(RoomId::new(), created);
        state.set(Appliance::AirConditioning, Power::On, created);

        let later = created + chrono::Duration::seconds(5);
        state.set(Appliance::Light, Power::On, later);

        assert_eq!(state.light, Power::On);
        assert_eq!(state.ac, Power::On);
        assert_eq!(state.last_updated, later);
    }

    #[test]
    fn should_parse_and_display_power() {
        assert_eq!("on".parse::<Power>().unwrap(), Power::On);
        assert_eq!(Power::Off.to_string(), "off");
        assert!("dim".parse::<Power>().is_err());
    }
}
