//! # smarthome: console smart-home hub
//!
//! Composition root that wires the domain, the registry and the console
//! adapter together.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise tracing on stderr so stdout stays the console surface
//! - Build the device factory and registry from the configured limits
//! - Register the configured seed devices
//! - Run the command loop on stdin/stdout until `exit` or end of input
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use anyhow::Context;
use smarthome_adapter_console::CommandLoop;
use smarthome_app::services::device_registry::DeviceRegistry;
use smarthome_domain::factory::DeviceFactory;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{Config, SeedDevice};

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter).context("parsing log filter")?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let limits = config.temperature_limits();
    let factory = DeviceFactory::new(limits);
    let mut registry = DeviceRegistry::new(limits);
    seed(&factory, &mut registry, &config.devices)?;
    tracing::info!(
        devices = registry.len(),
        format = %config.output.format,
        "smarthome ready"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut session = CommandLoop::new(stdin.lock(), stdout.lock(), registry, factory)
        .with_format(config.output.format);
    session.run().context("console session")?;

    tracing::info!("smarthome stopped");
    Ok(())
}

fn seed(
    factory: &DeviceFactory,
    registry: &mut DeviceRegistry,
    devices: &[SeedDevice],
) -> anyhow::Result<()> {
    for seed in devices {
        let device = factory
            .build(seed.category, &seed.id, seed.temperature)
            .with_context(|| format!("building seed device {:?}", seed.id))?;
        registry
            .register(device)
            .with_context(|| format!("registering seed device {:?}", seed.id))?;
    }
    Ok(())
}
