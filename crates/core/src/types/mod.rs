//! Core types for the storefront state container.
//!
//! This module provides type-safe wrappers for the cart and preference domain.

pub mod cart;
pub mod id;
pub mod preferences;

pub use cart::{Cart, CartError, CartItem, CartItemError};
pub use id::ProductId;
pub use preferences::{Currency, Language, ParsePreferenceError, Preferences};
