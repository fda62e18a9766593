//! Storefront State - persisted cart and preference stores.
//!
//! This crate keeps a browsing session's shopping cart and display
//! preferences, rehydrating them from storage when a session opens and
//! writing them through after every change.
//!
//! # Architecture
//!
//! - [`storage`] - Key-value storage port with memory and file backends
//! - [`persist`] - Versioned record envelope and storage keys
//! - [`cart`] / [`preferences`] - The two stores
//! - [`session`] - Both stores over one shared backend
//!
//! # Example
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use storefront_state::{MemoryStorage, Session};
//! use storefront_state_core::{CartItem, Currency};
//!
//! let mut session = Session::open(MemoryStorage::new())?;
//! session.cart_mut().add_item(CartItem::new("A", 2, Decimal::from(10)))?;
//! session.cart_mut().add_item(CartItem::new("A", 3, Decimal::from(10)))?;
//! session.preferences_mut().set_currency(Currency::Euro)?;
//!
//! assert_eq!(session.cart().total_items(), 5);
//! assert_eq!(session.cart().total_price(), Decimal::from(50));
//! # Ok::<(), storefront_state::StoreError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod persist;
pub mod preferences;
pub mod session;
pub mod storage;

pub use cart::{CartStore, CartSummary};
pub use config::{ConfigError, StateConfig};
pub use error::{Result, StoreError};
pub use preferences::PreferencesStore;
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
