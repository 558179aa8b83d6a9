//! Device: a controllable home appliance with identity and status.
//!
//! Light, thermostat and door lock are variants of one [`DeviceKind`] rather
//! than separate types; [`Device::activate`] and [`Device::deactivate`] switch
//! over the kind to pick the category-specific status.

mod category;
mod status;

pub use category::Category;
pub use status::DeviceStatus;

use serde::{Deserialize, Serialize};

use crate::error::{SmartHomeError, ValidationError};
use crate::event::{DeviceEvent, EventKind};
use crate::id::DeviceId;
use crate::time::{Timestamp, now};

/// Category-specific device data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum DeviceKind {
    Light,
    Thermostat {
        /// Target temperature in degrees.
        temperature: i32,
    },
    #[serde(rename = "door")]
    Lock,
}

impl DeviceKind {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Light => Category::Light,
            Self::Thermostat { .. } => Category::Thermostat,
            Self::Lock => Category::Lock,
        }
    }
}

/// A registered device.
///
/// The id never changes after construction and the status only moves through
/// [`activate`](Self::activate), [`deactivate`](Self::deactivate) and the
/// [`update_status`](Self::update_status) observer hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    id: DeviceId,
    kind: DeviceKind,
    status: DeviceStatus,
    last_changed: Timestamp,
}

impl Device {
    /// Create a device in the `off` status.
    #[must_use]
    pub fn new(id: DeviceId, kind: DeviceKind) -> Self {
        Self {
            id,
            kind,
            status: DeviceStatus::Off,
            last_changed: now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        &self.id
    }

    #[must_use]
    pub fn kind(&self) -> &DeviceKind {
        &self.kind
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    #[must_use]
    pub fn status(&self) -> &DeviceStatus {
        &self.status
    }

    /// When the status or temperature last actually changed.
    #[must_use]
    pub fn last_changed(&self) -> Timestamp {
        self.last_changed
    }

    /// The thermostat target, `None` for other categories.
    #[must_use]
    pub fn temperature(&self) -> Option<i32> {
        match self.kind {
            DeviceKind::Thermostat { temperature } => Some(temperature),
            DeviceKind::Light | DeviceKind::Lock => None,
        }
    }

    /// Switch the device to its category's "on" status.
    ///
    /// Idempotent: activating twice leaves the status unchanged, the returned
    /// event simply reports no change.
    pub fn activate(&mut self) -> DeviceEvent {
        let next = match self.kind {
            DeviceKind::Light => DeviceStatus::On,
            DeviceKind::Thermostat { .. } => DeviceStatus::Active,
            DeviceKind::Lock => DeviceStatus::Locked,
        };
        self.transition(EventKind::Activated, next)
    }

    /// Switch the device to its category's "off" status.
    pub fn deactivate(&mut self) -> DeviceEvent {
        let next = match self.kind {
            DeviceKind::Light | DeviceKind::Thermostat { .. } => DeviceStatus::Off,
            DeviceKind::Lock => DeviceStatus::Unlocked,
        };
        self.transition(EventKind::Deactivated, next)
    }

    /// Observer hook: the device reacts to an external status report.
    pub fn update_status(&mut self, status: DeviceStatus) -> DeviceEvent {
        self.transition(EventKind::StatusUpdated, status)
    }

    /// Change a thermostat's target temperature.
    ///
    /// Range checks belong to the caller, see
    /// [`TemperatureLimits`](crate::factory::TemperatureLimits).
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Unsupported`] for non-thermostat devices.
    pub fn set_temperature(&mut self, value: i32) -> Result<DeviceEvent, SmartHomeError> {
        let category = self.category();
        let DeviceKind::Thermostat { temperature } = &mut self.kind else {
            return Err(SmartHomeError::Unsupported {
                category,
                operation: "set_temperature",
            });
        };
        if *temperature != value {
            *temperature = value;
            self.last_changed = now();
        }
        Ok(self.event(EventKind::TemperatureSet(value), self.status.clone()))
    }

    /// Consume the device, producing the event that records its removal.
    #[must_use]
    pub fn into_removed(self) -> DeviceEvent {
        self.event(EventKind::Removed, self.status.clone())
    }

    fn transition(&mut self, kind: EventKind, next: DeviceStatus) -> DeviceEvent {
        let previous = std::mem::replace(&mut self.status, next);
        if previous != self.status {
            self.last_changed = now();
        }
        self.event(kind, previous)
    }

    fn event(&self, kind: EventKind, previous: DeviceStatus) -> DeviceEvent {
        DeviceEvent {
            device_id: self.id.clone(),
            category: self.category(),
            kind,
            previous,
            current: self.status.clone(),
        }
    }
}

/// Parse a whole-number temperature typed by the user.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTemperature`] when `input` is not an
/// integer.
pub fn parse_temperature(input: &str) -> Result<i32, ValidationError> {
    let trimmed = input.trim();
    trimmed
        .parse()
        .map_err(|_| ValidationError::InvalidTemperature(trimmed.to_string()))
}
