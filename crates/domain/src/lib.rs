//! # smarthome-domain
//!
//! Pure domain model for the smarthome device-control core.
//!
//! ## Responsibilities
//! - Foundational types: device identifiers, error conventions, timestamps
//! - Define **Devices** as a tagged variant over their [`Category`](device::Category)
//!   (light, thermostat, door lock) with category-specific fields
//! - Define **Statuses** and the **Actions** (`on` / `off`) that move them
//! - Define **Device events**, the observable record of every mutation
//! - Provide the **Device factory** that turns a category tag plus creation
//!   parameters into a validated [`Device`](device::Device)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod id;
pub mod time;

pub mod action;
pub mod device;
pub mod event;
pub mod factory;
