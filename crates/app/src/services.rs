//! Application services: use-case implementations.

pub mod device_proxy;
pub mod device_registry;
