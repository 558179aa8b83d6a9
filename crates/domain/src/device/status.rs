//! Device status: the only mutable state a device carries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Current status of a device.
///
/// Serialised as its lowercase display string; unrecognised strings pushed
/// through the observer hook are kept verbatim in [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceStatus {
    #[default]
    Off,
    On,
    Active,
    Locked,
    Unlocked,
    Other(String),
}

impl DeviceStatus {
    /// Whether this is an off-equivalent value (`off` or `unlocked`).
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        matches!(self, Self::Off | Self::Unlocked)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Active => f.write_str("active"),
            Self::Locked => f.write_str("locked"),
            Self::Unlocked => f.write_str("unlocked"),
            Self::Other(value) => f.write_str(value),
        }
    }
}

impl From<String> for DeviceStatus {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "on" => Self::On,
            "active" => Self::Active,
            "locked" => Self::Locked,
            "unlocked" => Self::Unlocked,
            _ => Self::Other(value),
        }
    }
}

impl TryFrom<String> for DeviceStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeviceStatus> for String {
    fn from(status: DeviceStatus) -> Self {
        match status {
            DeviceStatus::Other(value) => value,
            known => known.to_string(),
        }
    }
}

impl FromStr for DeviceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyStatus);
        }
        Ok(Self::from(trimmed.to_string()))
    }
}
