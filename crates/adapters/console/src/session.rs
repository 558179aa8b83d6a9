//! The interactive command loop.

use std::io::{self, BufRead, Write};

use smarthome_app::services::device_registry::{DeviceRegistry, StatusEntry};
use smarthome_domain::device::{self, Category, DeviceStatus};
use smarthome_domain::error::{SmartHomeError, ValidationError};
use smarthome_domain::event::DeviceEvent;
use smarthome_domain::factory::DeviceFactory;
use smarthome_domain::id::DeviceId;

use crate::command::Command;
use crate::format::OutputFormat;

const DEVICE_TYPE_PROMPT: &str = "Enter device type (light, thermostat, door): ";
const DEVICE_ID_PROMPT: &str = "Enter device ID: ";
const ACTION_PROMPT: &str = "Enter action (on/off): ";
const TEMPERATURE_PROMPT: &str = "Enter temperature: ";
const STATUS_PROMPT: &str = "Enter status: ";

/// Why a single command did not complete.
#[derive(Debug, thiserror::Error)]
enum StepError {
    #[error(transparent)]
    Domain(#[from] SmartHomeError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("input closed")]
    EndOfInput,
}

impl From<ValidationError> for StepError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(err.into())
    }
}

/// Reads commands from `input`, writes prompts and results to `output`.
pub struct CommandLoop<R, W> {
    input: R,
    output: W,
    registry: DeviceRegistry,
    factory: DeviceFactory,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> CommandLoop<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, registry: DeviceRegistry, factory: DeviceFactory) -> Self {
        Self {
            input,
            output,
            registry,
            factory,
            format: OutputFormat::default(),
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Give back the registry and the output once the loop is done.
    #[must_use]
    pub fn into_parts(self) -> (DeviceRegistry, W) {
        (self.registry, self.output)
    }

    /// Process commands until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when reading or writing fails.
    /// Domain errors are printed and never end the loop.
    pub fn run(&mut self) -> io::Result<()> {
        let prompt = command_prompt();
        loop {
            writeln!(self.output, "{prompt}")?;
            let Some(line) = self.read_line()? else {
                tracing::debug!("input closed");
                break;
            };
            if line.is_empty() {
                continue;
            }
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    tracing::debug!(input = %line, "unknown command");
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            tracing::debug!(%command, "command received");
            if command == Command::Exit {
                break;
            }
            match self.execute(command) {
                Ok(()) => {}
                Err(StepError::Domain(err)) => {
                    tracing::warn!(%command, %err, "command failed");
                    writeln!(self.output, "Error: {err}")?;
                }
                Err(StepError::Io(err)) => return Err(err),
                Err(StepError::EndOfInput) => {
                    tracing::debug!(%command, "input closed mid-command");
                    break;
                }
            }
        }
        self.output.flush()
    }

    fn execute(&mut self, command: Command) -> Result<(), StepError> {
        match command {
            Command::AddDevice => self.add_device(),
            Command::ControlDevice => {
                let id = self.ask_id()?;
                let action = self.ask(ACTION_PROMPT)?;
                let event = self.registry.dispatch(&id, &action)?;
                self.report(&event)
            }
            Command::ShowStatus => self.show_status(),
            Command::RemoveDevice => {
                let id = self.ask_id()?;
                let event = self.registry.remove(&id)?;
                self.report(&event)
            }
            Command::SetTemperature => {
                let id = self.ask_id()?;
                let value = device::parse_temperature(&self.ask(TEMPERATURE_PROMPT)?)?;
                let event = self.registry.set_temperature(&id, value)?;
                self.report(&event)
            }
            Command::UpdateStatus => {
                let id = self.ask_id()?;
                let status: DeviceStatus = self.ask(STATUS_PROMPT)?.parse()?;
                let event = self.registry.notify(&id, status)?;
                self.report(&event)
            }
            Command::Help => self.help(),
            Command::Exit => Ok(()),
        }
    }

    fn add_device(&mut self) -> Result<(), StepError> {
        let category: Category = self.ask(DEVICE_TYPE_PROMPT)?.parse()?;
        let id = self.ask(DEVICE_ID_PROMPT)?;
        let temperature = if category.requires_temperature() {
            Some(device::parse_temperature(&self.ask(TEMPERATURE_PROMPT)?)?)
        } else {
            None
        };
        let device = self.factory.build(category, &id, temperature)?;
        let added = format!("{} {} added.", device.category(), device.id());
        self.registry.register(device)?;
        writeln!(self.output, "{added}")?;
        Ok(())
    }

    fn show_status(&mut self) -> Result<(), StepError> {
        match self.format {
            OutputFormat::Text => {
                for entry in self.registry.status_report() {
                    writeln!(self.output, "{entry}")?;
                }
            }
            OutputFormat::Json => {
                let rows: Vec<StatusEntry<'_>> = self.registry.status_report().collect();
                serde_json::to_writer_pretty(&mut self.output, &rows).map_err(io::Error::from)?;
                writeln!(self.output)?;
            }
        }
        Ok(())
    }

    fn help(&mut self) -> Result<(), StepError> {
        for command in Command::ALL {
            writeln!(self.output, "  {:<16}{}", command.token(), command.summary())?;
        }
        Ok(())
    }

    fn report(&mut self, event: &DeviceEvent) -> Result<(), StepError> {
        writeln!(self.output, "{event}")?;
        Ok(())
    }

    fn ask_id(&mut self) -> Result<DeviceId, StepError> {
        Ok(DeviceId::new(self.ask(DEVICE_ID_PROMPT)?)?)
    }

    fn ask(&mut self, prompt: &str) -> Result<String, StepError> {
        writeln!(self.output, "{prompt}")?;
        self.read_line()?.ok_or(StepError::EndOfInput)
    }

    /// Next trimmed line, `None` at end of input. Invalid UTF-8 bytes become
    /// U+FFFD.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).trim().to_string()))
    }
}

fn command_prompt() -> String {
    let tokens = Command::ALL.map(Command::token);
    format!("Enter command ({}): ", tokens.join(", "))
}
