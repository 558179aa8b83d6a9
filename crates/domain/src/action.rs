//! Action: the symbolic command a proxy translates into a device call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SmartHomeError;

/// A user command directed at one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Maps to [`Device::activate`](crate::device::Device::activate).
    On,
    /// Maps to [`Device::deactivate`](crate::device::Device::deactivate).
    Off,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

impl FromStr for Action {
    type Err = SmartHomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.eq_ignore_ascii_case("on") {
            Ok(Self::On)
        } else if value.eq_ignore_ascii_case("off") {
            Ok(Self::Off)
        } else {
            Err(SmartHomeError::InvalidAction(value.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_actions_case_insensitively() {
        assert_eq!("ON".parse::<Action>(), Ok(Action::On));
        assert_eq!(" Off ".parse::<Action>(), Ok(Action::Off));
    }

    #[test]
    fn should_fail_with_invalid_action_when_value_is_unknown() {
        assert_eq!(
            "toggle".parse::<Action>(),
            Err(SmartHomeError::InvalidAction("toggle".to_string()))
        );
        assert_eq!(
            "".parse::<Action>(),
            Err(SmartHomeError::InvalidAction(String::new()))
        );
    }

    #[test]
    fn should_display_lowercase() {
        assert_eq!(Action::On.to_string(), "on");
        assert_eq!(Action::Off.to_string(), "off");
    }
}
