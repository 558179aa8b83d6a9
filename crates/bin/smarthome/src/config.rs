//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory (or the path in
//! `SMARTHOME_CONFIG`). Every field has a default so the file is optional.
//! Environment variables take precedence over file values.

use serde::Deserialize;
use smarthome_adapter_console::{OutputFormat, UnknownFormat};
use smarthome_domain::device::Category;
use smarthome_domain::factory::TemperatureLimits;

const DEFAULT_PATH: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Thermostat bounds.
    pub thermostat: ThermostatConfig,
    /// Console output settings.
    pub output: OutputConfig,
    /// Devices registered before the first prompt.
    pub devices: Vec<SeedDevice>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Accepted thermostat temperature range, inclusive.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    pub min_temperature: i32,
    pub max_temperature: i32,
}

/// Console output configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `text` or `json` rendering of `showStatus`.
    pub format: OutputFormat,
}

/// A device to register at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedDevice {
    pub category: Category,
    pub id: String,
    /// Initial temperature, required for thermostats.
    #[serde(default)]
    pub temperature: Option<i32>,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, an override
    /// is invalid, or the resulting values fail validation.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SMARTHOME_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("SMARTHOME_OUTPUT") {
            self.override_output_format(&val)?;
        }
        Ok(())
    }

    fn override_output_format(&mut self, value: &str) -> Result<(), ConfigError> {
        self.output.format = value.parse()?;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.thermostat.min_temperature > self.thermostat.max_temperature {
            return Err(ConfigError::Validation(format!(
                "min_temperature ({}) exceeds max_temperature ({})",
                self.thermostat.min_temperature, self.thermostat.max_temperature
            )));
        }
        Ok(())
    }

    /// The thermostat range as a domain value.
    #[must_use]
    pub fn temperature_limits(&self) -> TemperatureLimits {
        TemperatureLimits {
            min: self.thermostat.min_temperature,
            max: self.thermostat.max_temperature,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            thermostat: ThermostatConfig::default(),
            output: OutputConfig::default(),
            devices: default_devices(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthome=info,smarthome_app=info,smarthome_adapter_console=info".to_string(),
        }
    }
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        let limits = TemperatureLimits::default();
        Self {
            min_temperature: limits.min,
            max_temperature: limits.max,
        }
    }
}

fn default_devices() -> Vec<SeedDevice> {
    vec![
        SeedDevice {
            category: Category::Light,
            id: "1".to_string(),
            temperature: None,
        },
        SeedDevice {
            category: Category::Thermostat,
            id: "2".to_string(),
            temperature: Some(70),
        },
        SeedDevice {
            category: Category::Lock,
            id: "3".to_string(),
            temperature: None,
        },
    ]
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// `SMARTHOME_OUTPUT` holds an unknown format.
    #[error("invalid output format override")]
    Format(#[from] UnknownFormat),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
