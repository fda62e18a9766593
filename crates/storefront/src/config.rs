//! State configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_STATE_DIR` - Directory holding the persisted records (default: `.storefront-state`)
//! - `STOREFRONT_STATE_RESET_CORRUPT` - Replace unreadable records with defaults
//!   instead of failing (default: false)

use std::path::PathBuf;

use thiserror::Error;

/// Default directory for file-backed storage, relative to the working directory.
pub const DEFAULT_STATE_DIR: &str = ".storefront-state";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where and how session state is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateConfig {
    /// Root directory for the record files
    pub state_dir: PathBuf,
    /// Open sessions with `open_or_reset` instead of `open`
    pub reset_corrupt: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            reset_corrupt: false,
        }
    }
}

impl StateConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let state_dir = lookup("STOREFRONT_STATE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_STATE_DIR), PathBuf::from);

        let reset_corrupt = match lookup("STOREFRONT_STATE_RESET_CORRUPT") {
            Some(value) => parse_bool("STOREFRONT_STATE_RESET_CORRUPT", &value)?,
            None => false,
        };

        Ok(Self {
            state_dir,
            reset_corrupt,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a boolean flag the way shells usually spell them.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}
