//! Device proxy: mediates every access to a single device.

use smarthome_domain::action::Action;
use smarthome_domain::device::{Device, DeviceStatus};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::event::DeviceEvent;
use smarthome_domain::factory::TemperatureLimits;
use smarthome_domain::id::DeviceId;

/// Exclusive wrapper around one [`Device`].
///
/// The registry never calls device mutators directly. Every access goes
/// through here and is traced.
#[derive(Debug, Clone)]
pub struct DeviceProxy {
    device: Device,
}

impl DeviceProxy {
    #[must_use]
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    #[must_use]
    pub fn id(&self) -> &DeviceId {
        self.device.id()
    }

    /// Read-only view of the wrapped device.
    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The wrapped device's status, without mutating it.
    #[must_use]
    pub fn current_status(&self) -> &DeviceStatus {
        self.device.status()
    }

    /// Parse and apply a symbolic action (`on` / `off`, any case).
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::InvalidAction`] for anything else; the
    /// device is left untouched.
    pub fn perform_action(&mut self, action: &str) -> Result<DeviceEvent, SmartHomeError> {
        let action: Action = action.parse().inspect_err(|err| {
            tracing::warn!(device_id = %self.device.id(), %err, "rejected action");
        })?;
        Ok(self.apply(action))
    }

    /// Apply an already-parsed action.
    pub fn apply(&mut self, action: Action) -> DeviceEvent {
        let event = match action {
            Action::On => self.device.activate(),
            Action::Off => self.device.deactivate(),
        };
        tracing::info!(
            device_id = %event.device_id,
            %action,
            from = %event.previous,
            to = %event.current,
            "device action applied"
        );
        event
    }

    /// Forward an external status report to the device's observer hook.
    pub fn notify(&mut self, status: DeviceStatus) -> DeviceEvent {
        let event = self.device.update_status(status);
        tracing::debug!(
            device_id = %event.device_id,
            from = %event.previous,
            to = %event.current,
            "device status updated"
        );
        event
    }

    /// Forward a new target temperature once it passes `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Unsupported`] when the device is not a
    /// thermostat, whatever the value, then
    /// [`SmartHomeError::InvalidInput`] when `value` is out of range.
    pub fn set_temperature(
        &mut self,
        value: i32,
        limits: TemperatureLimits,
    ) -> Result<DeviceEvent, SmartHomeError> {
        let category = self.device.category();
        if !category.requires_temperature() {
            return Err(SmartHomeError::Unsupported {
                category,
                operation: "set_temperature",
            });
        }
        let event = self.device.set_temperature(limits.check(value)?)?;
        tracing::info!(device_id = %event.device_id, temperature = value, "temperature set");
        Ok(event)
    }

    /// Release the wrapped device.
    #[must_use]
    pub fn into_device(self) -> Device {
        self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::device::DeviceKind;

    fn proxy(kind: DeviceKind) -> DeviceProxy {
        DeviceProxy::new(Device::new(DeviceId::new("1").unwrap(), kind))
    }

    #[test]
    fn should_activate_when_action_is_on() {
        let mut light = proxy(DeviceKind::Light);
        let event = light.perform_action("on").unwrap();
        assert_eq!(light.current_status(), &DeviceStatus::On);
        assert_eq!(event.to_string(), "Light 1 is turned on.");
    }

    #[test]
    fn should_accept_action_in_any_case() {
        let mut door = proxy(DeviceKind::Lock);
        door.perform_action("ON").unwrap();
        assert_eq!(door.current_status(), &DeviceStatus::Locked);
        door.perform_action("Off").unwrap();
        assert_eq!(door.current_status(), &DeviceStatus::Unlocked);
    }

    #[test]
    fn should_reject_invalid_action_without_mutation() {
        let mut light = proxy(DeviceKind::Light);
        light.perform_action("on").unwrap();

        let result = light.perform_action("blink");

        assert_eq!(
            result,
            Err(SmartHomeError::InvalidAction("blink".to_string()))
        );
        assert_eq!(light.current_status(), &DeviceStatus::On);
    }

    #[test]
    fn should_not_mutate_when_reading_status() {
        let light = proxy(DeviceKind::Light);
        let before = light.device().clone();
        let _ = light.current_status();
        assert_eq!(light.device(), &before);
    }

    #[test]
    fn should_forward_notification_to_device() {
        let mut thermostat = proxy(DeviceKind::Thermostat { temperature: 70 });
        let event = thermostat.notify(DeviceStatus::Active);
        assert_eq!(thermostat.current_status(), &DeviceStatus::Active);
        assert_eq!(event.to_string(), "Thermostat 1 is active");
    }

    #[test]
    fn should_forward_temperature_to_thermostat_only() {
        let mut thermostat = proxy(DeviceKind::Thermostat { temperature: 70 });
        thermostat
            .set_temperature(65, TemperatureLimits::default())
            .unwrap();
        assert_eq!(thermostat.device().temperature(), Some(65));

        let mut light = proxy(DeviceKind::Light);
        assert!(matches!(
            light.set_temperature(65, TemperatureLimits::default()),
            Err(SmartHomeError::Unsupported { .. })
        ));
    }

    #[test]
    fn should_report_unsupported_before_range_for_non_thermostat() {
        let mut light = proxy(DeviceKind::Light);
        let result = light.set_temperature(200, TemperatureLimits::default());
        assert!(matches!(
            result,
            Err(SmartHomeError::Unsupported {
                category: smarthome_domain::device::Category::Light,
                ..
            })
        ));
    }
}
