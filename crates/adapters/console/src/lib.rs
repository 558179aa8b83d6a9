//! # smarthome-adapter-console
//!
//! Driving adapter that reads one command per line and calls into the
//! [`DeviceRegistry`](smarthome_app::services::device_registry::DeviceRegistry).
//!
//! ## Commands
//!
//! | Command | Prompts | Effect |
//! |---------|---------|--------|
//! | `addDevice` | type, id, temperature (thermostat only) | build through the factory, then register |
//! | `controlDevice` | id, action (`on` / `off`) | dispatch the action |
//! | `showStatus` | none | print one line per device, or a JSON array |
//! | `removeDevice` | id | unregister the device |
//! | `setTemperature` | id, temperature | change a thermostat target |
//! | `updateStatus` | id, status | push an observed status into the device |
//! | `help` | none | list the commands |
//! | `exit` | none | stop the loop (end of input does the same) |
//!
//! Domain errors are printed and the loop keeps going; only IO failures
//! end it with an error.
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` and `smarthome-domain` only.

mod command;
mod format;
mod session;

pub use command::{Command, UnknownCommand};
pub use format::{OutputFormat, UnknownFormat};
pub use session::CommandLoop;
