//! Storefront State Core - Shared types library.
//!
//! This crate provides the types shared by the storefront state components:
//! - `storefront-state` - Persisted cart and preference stores
//! - `storefront-state-cli` - Command-line access to a stored session
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no
//! storage access. Persistence lives in the `storefront-state` crate.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, cart line items, and display preferences

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
