//! Persisted display preferences.

use storefront_state_core::{Currency, Language, Preferences};
use tracing::instrument;

use crate::error::Result;
use crate::persist::{self, keys};
use crate::storage::Storage;

/// Preference store backed by an injected [`Storage`].
///
/// Defaults to English and Dollar until a setter is called.
#[derive(Debug)]
pub struct PreferencesStore<S> {
    storage: S,
    preferences: Preferences,
}

impl<S: Storage> PreferencesStore<S> {
    /// Open the store, rehydrating any persisted preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the stored record is
    /// corrupt or from a newer schema.
    pub fn open(storage: S) -> Result<Self> {
        let preferences = persist::load(&storage, keys::PREFERENCES)?.unwrap_or_default();
        Ok(Self {
            storage,
            preferences,
        })
    }

    /// Open the store, falling back to defaults if the record is unusable.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage cannot be read.
    pub fn open_or_reset(storage: S) -> Result<Self> {
        let preferences = match persist::load(&storage, keys::PREFERENCES) {
            Ok(preferences) => preferences.unwrap_or_default(),
            Err(e) if e.is_bad_record() => {
                tracing::warn!(error = %e, "Discarding unreadable preferences");
                Preferences::default()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            storage,
            preferences,
        })
    }

    /// Discard in-memory state and rehydrate from storage.
    ///
    /// # Errors
    ///
    /// Same as [`PreferencesStore::open`].
    pub fn reload(&mut self) -> Result<()> {
        self.preferences = persist::load(&self.storage, keys::PREFERENCES)?.unwrap_or_default();
        Ok(())
    }

    /// Replace the display language.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.preferences.language = language;
        self.persist()
    }

    /// Replace the display currency.
    ///
    /// Cart prices are not converted.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub fn set_currency(&mut self, currency: Currency) -> Result<()> {
        self.preferences.currency = currency;
        self.persist()
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.preferences.language
    }

    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.preferences.currency
    }

    #[must_use]
    pub const fn preferences(&self) -> Preferences {
        self.preferences
    }

    fn persist(&self) -> Result<()> {
        persist::save(&self.storage, keys::PREFERENCES, &self.preferences)
    }
}
