//! Display preferences: language and currency.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Language`] or [`Currency`] from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePreferenceError {
    #[error("unknown language: {0} (expected English, Spanish or French)")]
    Language(String),
    #[error("unknown currency: {0} (expected Dollar, Euro or Rupees)")]
    Currency(String),
}

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
}

impl Language {
    /// All supported languages, in menu order.
    pub const ALL: [Self; 3] = [Self::English, Self::Spanish, Self::French];

    /// ISO 639-1 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::English => write!(f, "English"),
            Self::Spanish => write!(f, "Spanish"),
            Self::French => write!(f, "French"),
        }
    }
}

impl std::str::FromStr for Language {
    type Err = ParsePreferenceError;

    /// Accepts the variant name or its ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Self::English),
            "spanish" | "es" => Ok(Self::Spanish),
            "french" | "fr" => Ok(Self::French),
            _ => Err(ParsePreferenceError::Language(s.to_owned())),
        }
    }
}

/// Display currency.
///
/// Selecting a currency only changes how amounts are labelled; cart prices
/// are stored as snapshotted and never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    Dollar,
    Euro,
    Rupees,
}

impl Currency {
    /// All supported currencies, in menu order.
    pub const ALL: [Self; 3] = [Self::Dollar, Self::Euro, Self::Rupees];

    /// Currency symbol for display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::Euro => "€",
            Self::Rupees => "₹",
        }
    }

    /// ISO 4217 currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Dollar => "USD",
            Self::Euro => "EUR",
            Self::Rupees => "INR",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dollar => write!(f, "Dollar"),
            Self::Euro => write!(f, "Euro"),
            Self::Rupees => write!(f, "Rupees"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = ParsePreferenceError;

    /// Accepts the variant name or its ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dollar" | "usd" => Ok(Self::Dollar),
            "euro" | "eur" => Ok(Self::Euro),
            "rupees" | "inr" => Ok(Self::Rupees),
            _ => Err(ParsePreferenceError::Currency(s.to_owned())),
        }
    }
}

/// A user's display preferences.
///
/// Defaults to English and Dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Preferences {
    pub language: Language,
    pub currency: Currency,
}
