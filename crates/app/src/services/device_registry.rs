//! Device registry: the hub that owns every device and routes commands.

use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;
use smarthome_domain::device::{Category, Device, DeviceStatus};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::event::DeviceEvent;
use smarthome_domain::factory::TemperatureLimits;
use smarthome_domain::id::DeviceId;
use smarthome_domain::time::Timestamp;

use super::device_proxy::DeviceProxy;

/// Owns devices (through their proxies) in registration order.
///
/// `index` maps every registered id to its position in `proxies`; the two are
/// always updated together so each proxy has exactly one index entry.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    proxies: Vec<DeviceProxy>,
    index: HashMap<DeviceId, usize>,
    limits: TemperatureLimits,
}

impl DeviceRegistry {
    /// Create an empty registry enforcing `limits` on temperature changes.
    #[must_use]
    pub fn new(limits: TemperatureLimits) -> Self {
        Self {
            proxies: Vec::new(),
            index: HashMap::new(),
            limits,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &DeviceId) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &DeviceId) -> Option<&Device> {
        self.index.get(id).map(|&pos| self.proxies[pos].device())
    }

    /// Take ownership of a device and wrap it in a proxy.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DuplicateId`] when a device with the same id
    /// is already registered; the registry is left unchanged.
    #[tracing::instrument(
        skip(self, device),
        fields(device_id = %device.id(), category = %device.category())
    )]
    pub fn register(&mut self, device: Device) -> Result<(), SmartHomeError> {
        if self.contains(device.id()) {
            tracing::warn!("duplicate device id");
            return Err(SmartHomeError::DuplicateId(device.id().clone()));
        }
        self.index.insert(device.id().clone(), self.proxies.len());
        self.proxies.push(DeviceProxy::new(device));
        tracing::info!(devices = self.proxies.len(), "device registered");
        Ok(())
    }

    /// Route a symbolic action to the device registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DeviceNotFound`] for an unknown id (nothing
    /// is mutated), or [`SmartHomeError::InvalidAction`] from the proxy.
    #[tracing::instrument(skip(self))]
    pub fn dispatch(&mut self, id: &DeviceId, action: &str) -> Result<DeviceEvent, SmartHomeError> {
        self.proxy_mut(id)?.perform_action(action)
    }

    /// Push an externally observed status into a device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DeviceNotFound`] for an unknown id.
    #[tracing::instrument(skip(self))]
    pub fn notify(
        &mut self,
        id: &DeviceId,
        status: DeviceStatus,
    ) -> Result<DeviceEvent, SmartHomeError> {
        Ok(self.proxy_mut(id)?.notify(status))
    }

    /// Change a thermostat's target temperature within the configured limits.
    ///
    /// # Errors
    ///
    /// - [`SmartHomeError::DeviceNotFound`] for an unknown id
    /// - [`SmartHomeError::Unsupported`] when the device is not a thermostat
    /// - [`SmartHomeError::InvalidInput`] when `value` is out of range
    #[tracing::instrument(skip(self))]
    pub fn set_temperature(
        &mut self,
        id: &DeviceId,
        value: i32,
    ) -> Result<DeviceEvent, SmartHomeError> {
        let limits = self.limits;
        self.proxy_mut(id)?.set_temperature(value, limits)
    }

    /// Unregister a device, destroying it together with its proxy.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::DeviceNotFound`] for an unknown id.
    #[tracing::instrument(skip(self))]
    pub fn remove(&mut self, id: &DeviceId) -> Result<DeviceEvent, SmartHomeError> {
        let pos = self
            .index
            .remove(id)
            .ok_or_else(|| SmartHomeError::DeviceNotFound(id.clone()))?;
        let proxy = self.proxies.remove(pos);
        for (offset, later) in self.proxies[pos..].iter().enumerate() {
            self.index.insert(later.id().clone(), pos + offset);
        }
        tracing::info!(devices = self.proxies.len(), "device removed");
        Ok(proxy.into_device().into_removed())
    }

    /// Lazily list `(category, id, status)` for every device in registration
    /// order. Call again (or clone the iterator) to restart.
    #[must_use]
    pub fn status_report(&self) -> StatusReport<'_> {
        StatusReport {
            inner: self.proxies.iter(),
        }
    }

    fn proxy_mut(&mut self, id: &DeviceId) -> Result<&mut DeviceProxy, SmartHomeError> {
        match self.index.get(id) {
            Some(&pos) => Ok(&mut self.proxies[pos]),
            None => {
                tracing::debug!(device_id = %id, "device not found");
                Err(SmartHomeError::DeviceNotFound(id.clone()))
            }
        }
    }
}

/// Iterator over the registry's [`StatusEntry`] rows.
#[derive(Debug, Clone)]
pub struct StatusReport<'a> {
    inner: std::slice::Iter<'a, DeviceProxy>,
}

impl<'a> Iterator for StatusReport<'a> {
    type Item = StatusEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|proxy| StatusEntry::from(proxy.device()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for StatusReport<'_> {}

impl FusedIterator for StatusReport<'_> {}

/// One row of the status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry<'a> {
    pub category: Category,
    pub id: &'a DeviceId,
    pub status: &'a DeviceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i32>,
    pub last_changed: Timestamp,
}

impl<'a> StatusEntry<'a> {
    /// The `(category, id, status)` triple.
    #[must_use]
    pub fn triple(&self) -> (Category, &'a DeviceId, &'a DeviceStatus) {
        (self.category, self.id, self.status)
    }
}

impl<'a> From<&'a Device> for StatusEntry<'a> {
    fn from(device: &'a Device) -> Self {
        Self {
            category: device.category(),
            id: device.id(),
            status: device.status(),
            temperature: device.temperature(),
            last_changed: device.last_changed(),
        }
    }
}

impl fmt::Display for StatusEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} is {}", self.category, self.id, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::error::ValidationError;
    use smarthome_domain::event::EventKind;
    use smarthome_domain::factory::DeviceFactory;

    fn id(value: &str) -> DeviceId {
        DeviceId::new(value).unwrap()
    }

    fn seeded() -> DeviceRegistry {
        let factory = DeviceFactory::default();
        let mut registry = DeviceRegistry::default();
        registry
            .register(factory.create("light", "1", &[]).unwrap())
            .unwrap();
        registry
            .register(factory.create("thermostat", "2", &[70]).unwrap())
            .unwrap();
        registry
            .register(factory.create("door", "3", &[]).unwrap())
            .unwrap();
        registry
    }

    fn triples(registry: &DeviceRegistry) -> Vec<(Category, String, String)> {
        registry
            .status_report()
            .map(|entry| {
                let (category, id, status) = entry.triple();
                (category, id.to_string(), status.to_string())
            })
            .collect()
    }

    fn row(category: Category, id: &str, status: &str) -> (Category, String, String) {
        (category, id.to_string(), status.to_string())
    }

    #[test]
    fn should_report_scenario_status_after_thermostat_turned_on() {
        let mut registry = seeded();

        let event = registry.dispatch(&id("2"), "on").unwrap();

        assert_eq!(event.current, DeviceStatus::Active);
        assert_eq!(
            triples(&registry),
            vec![
                row(Category::Light, "1", "off"),
                row(Category::Thermostat, "2", "active"),
                row(Category::Lock, "3", "off"),
            ]
        );
    }

    #[test]
    fn should_report_one_entry_per_device_in_registration_order() {
        let factory = DeviceFactory::default();
        let mut registry = DeviceRegistry::default();
        for name in ["z", "a", "m", "b"] {
            registry
                .register(factory.create("light", name, &[]).unwrap())
                .unwrap();
        }

        let ids: Vec<String> = registry
            .status_report()
            .map(|entry| entry.id.to_string())
            .collect();
        assert_eq!(ids, vec!["z", "a", "m", "b"]);
        assert_eq!(registry.status_report().len(), 4);
    }

    #[test]
    fn should_restart_status_report() {
        let registry = seeded();
        let report = registry.status_report();
        let first: Vec<_> = report.clone().collect();
        let second: Vec<_> = report.collect();
        assert_eq!(first, second);
        assert_eq!(registry.status_report().count(), 3);
    }

    #[test]
    fn should_return_to_off_equivalent_after_on_then_off() {
        let mut registry = seeded();
        for device_id in ["1", "2", "3"] {
            registry.dispatch(&id(device_id), "on").unwrap();
            registry.dispatch(&id(device_id), "off").unwrap();
        }
        assert!(
            registry
                .status_report()
                .all(|entry| entry.status.is_inactive())
        );
    }

    #[test]
    fn should_fail_with_not_found_and_leave_registry_untouched() {
        let mut registry = seeded();
        registry.dispatch(&id("1"), "on").unwrap();
        let before = triples(&registry);

        for action in ["on", "off", "bogus"] {
            let result = registry.dispatch(&id("42"), action);
            assert_eq!(result, Err(SmartHomeError::DeviceNotFound(id("42"))));
        }

        assert_eq!(triples(&registry), before);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn should_reject_duplicate_id() {
        let mut registry = seeded();
        let duplicate = DeviceFactory::default().create("door", "1", &[]).unwrap();

        let result = registry.register(duplicate);

        assert_eq!(result, Err(SmartHomeError::DuplicateId(id("1"))));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&id("1")).unwrap().category(), Category::Light);
    }

    #[test]
    fn should_surface_invalid_action_from_proxy() {
        let mut registry = seeded();
        let result = registry.dispatch(&id("1"), "dim");
        assert_eq!(result, Err(SmartHomeError::InvalidAction("dim".to_string())));
        assert_eq!(registry.get(&id("1")).unwrap().status(), &DeviceStatus::Off);
    }

    #[test]
    fn should_remove_device_and_keep_order_of_the_rest() {
        let mut registry = seeded();

        let event = registry.remove(&id("1")).unwrap();

        assert_eq!(event.kind, EventKind::Removed);
        assert!(!registry.contains(&id("1")));
        assert_eq!(
            triples(&registry),
            vec![
                row(Category::Thermostat, "2", "off"),
                row(Category::Lock, "3", "off"),
            ]
        );
        registry.dispatch(&id("3"), "on").unwrap();
        assert_eq!(
            registry.get(&id("3")).unwrap().status(),
            &DeviceStatus::Locked
        );
    }

    #[test]
    fn should_allow_reusing_id_after_removal() {
        let mut registry = seeded();
        registry.remove(&id("2")).unwrap();
        let light = DeviceFactory::default().create("light", "2", &[]).unwrap();
        registry.register(light).unwrap();
        assert_eq!(registry.get(&id("2")).unwrap().category(), Category::Light);
        assert_eq!(registry.status_report().last().unwrap().id, &id("2"));
    }

    #[test]
    fn should_fail_removing_unknown_device() {
        let mut registry = seeded();
        assert_eq!(
            registry.remove(&id("9")),
            Err(SmartHomeError::DeviceNotFound(id("9")))
        );
    }

    #[test]
    fn should_update_status_through_notify() {
        let mut registry = seeded();
        let event = registry.notify(&id("3"), DeviceStatus::Locked).unwrap();
        assert_eq!(event.to_string(), "Door 3 is locked");
        assert_eq!(
            registry.get(&id("3")).unwrap().status(),
            &DeviceStatus::Locked
        );
    }

    #[test]
    fn should_enforce_limits_when_setting_temperature() {
        let mut registry = DeviceRegistry::new(TemperatureLimits { min: 60, max: 75 });
        registry
            .register(DeviceFactory::default().create("thermostat", "2", &[70]).unwrap())
            .unwrap();

        let result = registry.set_temperature(&id("2"), 90);
        assert_eq!(
            result,
            Err(SmartHomeError::InvalidInput(
                ValidationError::TemperatureOutOfRange {
                    value: 90,
                    min: 60,
                    max: 75,
                }
            ))
        );

        registry.set_temperature(&id("2"), 72).unwrap();
        assert_eq!(registry.get(&id("2")).unwrap().temperature(), Some(72));
    }

    #[test]
    fn should_report_unsupported_when_light_gets_out_of_range_temperature() {
        let mut registry = seeded();
        let result = registry.set_temperature(&id("1"), 200);
        assert_eq!(
            result,
            Err(SmartHomeError::Unsupported {
                category: Category::Light,
                operation: "set_temperature",
            })
        );
    }

    #[test]
    fn should_include_temperature_in_serialized_entry() {
        let registry = seeded();
        let rows: Vec<_> = registry.status_report().collect();
        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(json[0]["category"], "light");
        assert_eq!(json[0]["id"], "1");
        assert_eq!(json[0]["status"], "off");
        assert!(json[0].get("temperature").is_none());
        assert_eq!(json[1]["temperature"], 70);
    }

    #[test]
    fn should_display_entry_like_status_line() {
        let registry = seeded();
        let lines: Vec<String> = registry
            .status_report()
            .map(|entry| entry.to_string())
            .collect();
        assert_eq!(
            lines,
            vec!["Light 1 is off", "Thermostat 2 is off", "Door 3 is off"]
        );
    }
}
