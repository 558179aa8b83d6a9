//! Console command tokens.

use std::fmt;
use std::str::FromStr;

/// A command accepted at the top-level prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddDevice,
    ControlDevice,
    ShowStatus,
    RemoveDevice,
    SetTemperature,
    UpdateStatus,
    Help,
    Exit,
}

impl Command {
    pub const ALL: [Self; 8] = [
        Self::AddDevice,
        Self::ControlDevice,
        Self::ShowStatus,
        Self::RemoveDevice,
        Self::SetTemperature,
        Self::UpdateStatus,
        Self::Help,
        Self::Exit,
    ];

    /// The token typed at the prompt.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::AddDevice => "addDevice",
            Self::ControlDevice => "controlDevice",
            Self::ShowStatus => "showStatus",
            Self::RemoveDevice => "removeDevice",
            Self::SetTemperature => "setTemperature",
            Self::UpdateStatus => "updateStatus",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Self::AddDevice => "register a new light, thermostat or door",
            Self::ControlDevice => "turn a device on or off",
            Self::ShowStatus => "list every device and its status",
            Self::RemoveDevice => "unregister a device",
            Self::SetTemperature => "change a thermostat's target temperature",
            Self::UpdateStatus => "record a status reported by the device itself",
            Self::Help => "show this list",
            Self::Exit => "quit",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// The line did not match any [`Command`] token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: {0}")]
pub struct UnknownCommand(pub String);

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.token().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownCommand(token.to_string()))
    }
}
