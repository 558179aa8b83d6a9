//! Device event: the observable record of a device mutation.
//!
//! Every mutator on [`Device`](crate::device::Device) returns one. Its
//! [`Display`](std::fmt::Display) form is the message the console prints.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::{Category, DeviceStatus};
use crate::id::DeviceId;

/// What happened to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum EventKind {
    Activated,
    Deactivated,
    /// The observer hook assigned a status directly.
    StatusUpdated,
    /// A thermostat received a new target temperature.
    TemperatureSet(i32),
    Removed,
}

/// A single device mutation, with the status before and after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub device_id: DeviceId,
    pub category: Category,
    pub kind: EventKind,
    pub previous: DeviceStatus,
    pub current: DeviceStatus,
}

impl DeviceEvent {
    /// Whether the status actually moved.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

impl fmt::Display for DeviceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            device_id: id,
            category,
            ..
        } = self;
        match (self.kind, *category) {
            (EventKind::Activated, Category::Light) => write!(f, "{category} {id} is turned on."),
            (EventKind::Activated, Category::Thermostat) => {
                write!(f, "{category} {id} is now active.")
            }
            (EventKind::Activated, Category::Lock) => write!(f, "{category} {id} is locked."),
            (EventKind::Deactivated, Category::Light | Category::Thermostat) => {
                write!(f, "{category} {id} is turned off.")
            }
            (EventKind::Deactivated, Category::Lock) => write!(f, "{category} {id} is unlocked."),
            (EventKind::StatusUpdated, _) => write!(f, "{category} {id} is {}", self.current),
            (EventKind::TemperatureSet(value), _) => {
                write!(f, "{category} {id} is set to {value} degrees.")
            }
            (EventKind::Removed, _) => write!(f, "{category} {id} was removed."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: Category, kind: EventKind, current: DeviceStatus) -> DeviceEvent {
        DeviceEvent {
            device_id: DeviceId::new("3").unwrap(),
            category,
            kind,
            previous: DeviceStatus::Off,
            current,
        }
    }

    #[test]
    fn should_render_activation_message_per_category() {
        assert_eq!(
            event(Category::Light, EventKind::Activated, DeviceStatus::On).to_string(),
            "Light 3 is turned on."
        );
        assert_eq!(
            event(Category::Thermostat, EventKind::Activated, DeviceStatus::Active).to_string(),
            "Thermostat 3 is now active."
        );
        assert_eq!(
            event(Category::Lock, EventKind::Activated, DeviceStatus::Locked).to_string(),
            "Door 3 is locked."
        );
    }

    #[test]
    fn should_render_deactivation_message_per_category() {
        assert_eq!(
            event(Category::Light, EventKind::Deactivated, DeviceStatus::Off).to_string(),
            "Light 3 is turned off."
        );
        assert_eq!(
            event(Category::Thermostat, EventKind::Deactivated, DeviceStatus::Off).to_string(),
            "Thermostat 3 is turned off."
        );
        assert_eq!(
            event(Category::Lock, EventKind::Deactivated, DeviceStatus::Unlocked).to_string(),
            "Door 3 is unlocked."
        );
    }

    #[test]
    fn should_render_removal_message() {
        assert_eq!(
            event(Category::Lock, EventKind::Removed, DeviceStatus::Off).to_string(),
            "Door 3 was removed."
        );
    }

    #[test]
    fn should_report_no_change_when_status_is_unchanged() {
        let unchanged = event(Category::Light, EventKind::Deactivated, DeviceStatus::Off);
        assert!(!unchanged.changed());
        let changed = event(Category::Light, EventKind::Activated, DeviceStatus::On);
        assert!(changed.changed());
    }

    #[test]
    fn should_serialize_kind_as_tagged_json() {
        let json = serde_json::to_value(EventKind::TemperatureSet(72)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "temperature_set", "value": 72})
        );
    }
}
