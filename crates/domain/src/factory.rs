//! Device factory: builds the right [`Device`] variant from a category tag.

use serde::{Deserialize, Serialize};

use crate::device::{Category, Device, DeviceKind};
use crate::error::{SmartHomeError, ValidationError};
use crate::id::DeviceId;

/// Inclusive bounds accepted for thermostat temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureLimits {
    pub min: i32,
    pub max: i32,
}

impl Default for TemperatureLimits {
    fn default() -> Self {
        Self { min: 40, max: 95 }
    }
}

impl TemperatureLimits {
    /// Return `value` unchanged when it lies within the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::TemperatureOutOfRange`] otherwise.
    pub fn check(self, value: i32) -> Result<i32, ValidationError> {
        if (self.min..=self.max).contains(&value) {
            Ok(value)
        } else {
            Err(ValidationError::TemperatureOutOfRange {
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Constructs devices from a category plus creation parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviceFactory {
    limits: TemperatureLimits,
}

impl DeviceFactory {
    #[must_use]
    pub fn new(limits: TemperatureLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn limits(&self) -> TemperatureLimits {
        self.limits
    }

    /// Build a device from a free-form category tag.
    ///
    /// `params[0]` is the initial temperature for a thermostat. Other
    /// categories take no parameters and ignore any that are given.
    ///
    /// # Errors
    ///
    /// - [`SmartHomeError::UnknownCategory`] when the tag is not recognised
    /// - [`SmartHomeError::InvalidInput`] when the id is blank, or a thermostat
    ///   temperature is missing or out of range
    pub fn create(
        &self,
        category: &str,
        id: &str,
        params: &[i32],
    ) -> Result<Device, SmartHomeError> {
        let category: Category = category.parse()?;
        self.build(category, id, params.first().copied())
    }

    /// Build a device from an already-parsed category.
    ///
    /// # Errors
    ///
    /// See [`create`](Self::create).
    pub fn build(
        &self,
        category: Category,
        id: &str,
        temperature: Option<i32>,
    ) -> Result<Device, SmartHomeError> {
        let id = DeviceId::new(id)?;
        let kind = match category {
            Category::Light => DeviceKind::Light,
            Category::Lock => DeviceKind::Lock,
            Category::Thermostat => {
                let value = temperature.ok_or(ValidationError::MissingTemperature)?;
                DeviceKind::Thermostat {
                    temperature: self.limits.check(value)?,
                }
            }
        };
        Ok(Device::new(id, kind))
    }
}
