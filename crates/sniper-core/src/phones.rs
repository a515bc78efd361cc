//! The closed set of phone models the scanner knows how to search for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Supported iPhone models, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhoneModel {
    IPhone16ProMax,
    IPhone16Pro,
    IPhone16,
    IPhone15ProMax,
    IPhone15Pro,
    IPhone15,
    IPhone14,
    IPhone13,
}

impl PhoneModel {
    pub const ALL: [Self; 8] = [
        Self::IPhone16ProMax,
        Self::IPhone16Pro,
        Self::IPhone16,
        Self::IPhone15ProMax,
        Self::IPhone15Pro,
        Self::IPhone15,
        Self::IPhone14,
        Self::IPhone13,
    ];

    /// Marketing name as it appears in ads and prompts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IPhone16ProMax => "iPhone 16 Pro Max",
            Self::IPhone16Pro => "iPhone 16 Pro",
            Self::IPhone16 => "iPhone 16",
            Self::IPhone15ProMax => "iPhone 15 Pro Max",
            Self::IPhone15Pro => "iPhone 15 Pro",
            Self::IPhone15 => "iPhone 15",
            Self::IPhone14 => "iPhone 14",
            Self::IPhone13 => "iPhone 13",
        }
    }
}

impl fmt::Display for PhoneModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhoneModel {
    type Err = ConfigError;

    /// Case-insensitive match on the marketing name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ConfigError::UnknownPhoneModel(s.to_string()))
    }
}
