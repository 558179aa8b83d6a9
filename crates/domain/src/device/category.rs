//! Device category: the fixed kind of a device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SmartHomeError;

/// The fixed kind of a device, determining how it reacts to actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Light,
    Thermostat,
    /// A door lock. Displayed as `Door`, parsed from `door` or `lock`.
    #[serde(rename = "door", alias = "lock")]
    Lock,
}

impl Category {
    /// Every known category, in the order prompts list them.
    pub const ALL: [Self; 3] = [Self::Light, Self::Thermostat, Self::Lock];

    /// The lowercase tag accepted by the factory and the console.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Thermostat => "thermostat",
            Self::Lock => "door",
        }
    }

    /// Whether devices of this category need an initial temperature.
    #[must_use]
    pub fn requires_temperature(self) -> bool {
        matches!(self, Self::Thermostat)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => f.write_str("Light"),
            Self::Thermostat => f.write_str("Thermostat"),
            Self::Lock => f.write_str("Door"),
        }
    }
}

impl FromStr for Category {
    type Err = SmartHomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.eq_ignore_ascii_case("light") {
            Ok(Self::Light)
        } else if tag.eq_ignore_ascii_case("thermostat") {
            Ok(Self::Thermostat)
        } else if tag.eq_ignore_ascii_case("door") || tag.eq_ignore_ascii_case("lock") {
            Ok(Self::Lock)
        } else {
            Err(SmartHomeError::UnknownCategory(tag.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_tags_case_insensitively() {
        assert_eq!("LIGHT".parse::<Category>(), Ok(Category::Light));
        assert_eq!(" Thermostat ".parse::<Category>(), Ok(Category::Thermostat));
        assert_eq!("door".parse::<Category>(), Ok(Category::Lock));
        assert_eq!("Lock".parse::<Category>(), Ok(Category::Lock));
    }

    #[test]
    fn should_fail_with_unknown_category_when_tag_is_unrecognised() {
        assert_eq!(
            "toaster".parse::<Category>(),
            Err(SmartHomeError::UnknownCategory("toaster".to_string()))
        );
    }

    #[test]
    fn should_display_lock_as_door() {
        assert_eq!(Category::Lock.to_string(), "Door");
        assert_eq!(Category::Light.to_string(), "Light");
    }

    #[test]
    fn should_roundtrip_every_tag_through_from_str() {
        for category in Category::ALL {
            assert_eq!(category.tag().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn should_deserialize_lock_alias() {
        let parsed: Category = serde_json::from_str("\"lock\"").unwrap();
        assert_eq!(parsed, Category::Lock);
        assert_eq!(serde_json::to_string(&Category::Lock).unwrap(), "\"door\"");
    }

    #[test]
    fn should_require_temperature_only_for_thermostat() {
        assert!(Category::Thermostat.requires_temperature());
        assert!(!Category::Light.requires_temperature());
        assert!(!Category::Lock.requires_temperature());
    }
}
