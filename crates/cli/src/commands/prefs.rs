//! Preference commands.
//!
//! # Usage
//!
//! ```bash
//! np-cart prefs show
//! np-cart prefs language spanish
//! np-cart prefs currency EUR
//! ```

use storefront_state::{FileStorage, Session};
use storefront_state_core::{Currency, Language};

use super::{CommandError, print_json};

/// Print the current preferences.
///
/// # Errors
///
/// Returns an error if output cannot be rendered.
pub fn show(session: &Session<FileStorage>) -> Result<(), CommandError> {
    print_json(&session.preferences().preferences())
}

/// Set the display language.
///
/// # Errors
///
/// Returns an error if the preferences cannot be written.
pub fn set_language(
    session: &mut Session<FileStorage>,
    language: Language,
) -> Result<(), CommandError> {
    session.preferences_mut().set_language(language)?;
    tracing::info!(%language, "Language updated");
    Ok(())
}

/// Set the display currency.
///
/// # Errors
///
/// Returns an error if the preferences cannot be written.
pub fn set_currency(
    session: &mut Session<FileStorage>,
    currency: Currency,
) -> Result<(), CommandError> {
    session.preferences_mut().set_currency(currency)?;
    tracing::info!(%currency, symbol = currency.symbol(), "Currency updated");
    Ok(())
}
