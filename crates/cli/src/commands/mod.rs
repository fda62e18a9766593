//! Command implementations.
//!
//! Every command opens the file-backed session, applies one operation, and
//! exits. The session directory comes from `--state-dir`, falling back to
//! `STOREFRONT_STATE_DIR` and then `.storefront-state`.

use std::path::PathBuf;

use storefront_state::{ConfigError, FileStorage, Session, StateConfig, StoreError};
use thiserror::Error;

pub mod cart;
pub mod prefs;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A store operation failed.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Output could not be rendered.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Open the session described by the environment and CLI overrides.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the records are unusable.
pub fn open_session(
    state_dir: Option<PathBuf>,
    reset_corrupt: bool,
) -> Result<Session<FileStorage>, CommandError> {
    let mut config = StateConfig::from_env()?;
    if let Some(dir) = state_dir {
        config.state_dir = dir;
    }
    config.reset_corrupt |= reset_corrupt;

    tracing::debug!(?config, "Opening session");
    Ok(Session::from_config(&config)?)
}

/// Delete the stored cart and preferences.
///
/// # Errors
///
/// Returns an error if the records cannot be removed.
pub fn reset(session: &mut Session<FileStorage>) -> Result<(), CommandError> {
    session.reset()?;
    tracing::info!(
        dir = %session.storage().root().display(),
        "Cleared stored cart and preferences"
    );
    Ok(())
}

/// Print a value as pretty JSON on stdout.
#[allow(clippy::print_stdout)]
fn print_json(value: &impl serde::Serialize) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
