//! Unified error handling for the state stores.
//!
//! All store operations return `Result<T, StoreError>`. Missing cart entries
//! are not errors; only storage failures, unreadable records, and invalid
//! input are reported.

use storefront_state_core::CartItemError;
use thiserror::Error;

use crate::storage::StorageError;

/// Error type for cart and preference stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A record could not be encoded.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A stored record exists but does not decode into a valid value.
    #[error("Corrupt record under {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// A stored record was written by a newer schema.
    #[error("Record under {key} has schema version {found}, newest supported is {supported}")]
    UnsupportedVersion {
        key: String,
        found: u32,
        supported: u32,
    },

    /// The caller supplied an invalid cart item.
    #[error("Invalid item: {0}")]
    InvalidItem(#[from] CartItemError),
}

impl StoreError {
    /// Whether the error concerns the stored record rather than the backend.
    ///
    /// These are the errors `open_or_reset` recovers from.
    #[must_use]
    pub const fn is_bad_record(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::UnsupportedVersion { .. })
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
