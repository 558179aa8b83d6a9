//! # smarthome-app
//!
//! Application layer: the use-cases that own and drive devices.
//!
//! ## Responsibilities
//! - `DeviceProxy`: the only path to a device's mutators; translates
//!   symbolic actions (`on` / `off`) into device calls and traces every access
//! - `DeviceRegistry`: owns devices in registration order, routes commands
//!   by id, and produces the status report
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only. Never imports adapter crates.
//! Adapters depend on *this* crate, not the reverse.

pub mod services;
