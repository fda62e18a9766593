//! A browsing session's state: cart plus preferences.
//!
//! There is no global session. Callers construct a [`Session`] over a storage
//! backend and hand it to whatever needs it.

use std::sync::Arc;

use tracing::instrument;

use crate::cart::{CartStore, CartSummary};
use crate::config::StateConfig;
use crate::error::Result;
use crate::persist::keys;
use crate::preferences::PreferencesStore;
use crate::storage::{FileStorage, Storage};

/// Cart and preference stores sharing one storage backend.
#[derive(Debug)]
pub struct Session<S> {
    storage: Arc<S>,
    cart: CartStore<Arc<S>>,
    preferences: PreferencesStore<Arc<S>>,
}

impl<S: Storage> Session<S> {
    /// Open a session, rehydrating both stores.
    ///
    /// # Errors
    ///
    /// Returns an error if either record cannot be read or is unusable.
    pub fn open(storage: S) -> Result<Self> {
        Self::open_shared(Arc::new(storage))
    }

    /// Open a session over a backend that other code also holds.
    ///
    /// # Errors
    ///
    /// Returns an error if either record cannot be read or is unusable.
    pub fn open_shared(storage: Arc<S>) -> Result<Self> {
        let cart = CartStore::open(Arc::clone(&storage))?;
        let preferences = PreferencesStore::open(Arc::clone(&storage))?;
        Ok(Self {
            storage,
            cart,
            preferences,
        })
    }

    /// Open a session, replacing unusable records with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage cannot be read.
    pub fn open_or_reset(storage: S) -> Result<Self> {
        let storage = Arc::new(storage);
        let cart = CartStore::open_or_reset(Arc::clone(&storage))?;
        let preferences = PreferencesStore::open_or_reset(Arc::clone(&storage))?;
        Ok(Self {
            storage,
            cart,
            preferences,
        })
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore<Arc<S>> {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore<Arc<S>> {
        &mut self.cart
    }

    #[must_use]
    pub const fn preferences(&self) -> &PreferencesStore<Arc<S>> {
        &self.preferences
    }

    pub const fn preferences_mut(&mut self) -> &mut PreferencesStore<Arc<S>> {
        &mut self.preferences
    }

    /// Complete checkout: snapshot the cart, then clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cleared cart cannot be written. The cart is
    /// empty in memory either way.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<CartSummary> {
        let summary = self.cart.summary();
        self.cart.clear_cart()?;
        tracing::info!(
            total_items = summary.total_items,
            total_price = %summary.total_price,
            "Checkout complete"
        );
        Ok(summary)
    }

    /// Delete both records and return both stores to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<()> {
        self.storage.remove(keys::CART)?;
        self.storage.remove(keys::PREFERENCES)?;
        self.cart.reload()?;
        self.preferences.reload()?;
        Ok(())
    }

    /// The shared storage backend.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl Session<FileStorage> {
    /// Open a file-backed session as described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be read, or are unusable and
    /// `config.reset_corrupt` is off.
    pub fn from_config(config: &StateConfig) -> Result<Self> {
        let storage = FileStorage::new(&config.state_dir);
        tracing::debug!(root = %storage.root().display(), "Opening file-backed session");
        if config.reset_corrupt {
            Self::open_or_reset(storage)
        } else {
            Self::open(storage)
        }
    }
}
