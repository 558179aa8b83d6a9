//! Common error types used across the workspace.
//!
//! Every error here is recoverable: the console adapter prints it and keeps
//! reading commands.

use crate::device::Category;
use crate::id::DeviceId;

/// Top-level error for every device-control operation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SmartHomeError {
    /// The category tag does not name a known device kind.
    #[error("unknown device category: {0}")]
    UnknownCategory(String),

    /// The action is neither `on` nor `off`.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// No device is registered under this id.
    #[error("device not found: {0}")]
    DeviceNotFound(DeviceId),

    /// A device is already registered under this id.
    #[error("device {0} is already registered")]
    DuplicateId(DeviceId),

    /// The operation does not apply to this kind of device.
    #[error("{category} does not support {operation}")]
    Unsupported {
        category: Category,
        operation: &'static str,
    },

    /// Malformed or out-of-range user input.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// Domain invariant violations on user-supplied values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("device id must not be empty")]
    EmptyId,

    #[error("status must not be empty")]
    EmptyStatus,

    #[error("a thermostat requires an initial temperature")]
    MissingTemperature,

    #[error("temperature {0:?} is not a whole number")]
    InvalidTemperature(String),

    #[error("temperature {value} is outside {min}..={max}")]
    TemperatureOutOfRange { value: i32, min: i32, max: i32 },
}
