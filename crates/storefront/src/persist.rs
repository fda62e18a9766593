//! Versioned records on top of a [`Storage`] backend.
//!
//! Every record is written as
//!
//! ```json
//! {"version": 1, "saved_at": "2026-01-01T00:00:00Z", "state": { ... }}
//! ```
//!
//! Loading accepts any envelope up to [`SCHEMA_VERSION`] as well as a bare
//! record with no envelope, which is treated as version 0. Version 0 and
//! version 1 share the same record shape, so upgrading is the identity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use storefront_state_core::{Cart, Preferences};

use crate::error::{Result, StoreError};
use crate::storage::{Storage, StorageError};

/// Newest record schema this crate reads and the one it writes.
pub const SCHEMA_VERSION: u32 = 1;

/// Storage keys owned by the stores.
pub mod keys {
    /// Key for the shopping cart record.
    pub const CART: &str = "cart-storage";

    /// Key for the display preferences record.
    pub const PREFERENCES: &str = "preferences-storage";
}

/// A value that can be persisted under a key.
pub trait Record: Serialize + DeserializeOwned {
    /// Check invariants after decoding.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the decoded value is unusable.
    fn check(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

impl Record for Cart {
    fn check(&self) -> std::result::Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

impl Record for Preferences {}

#[derive(Serialize)]
struct Envelope<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    state: &'a T,
}

fn corrupt(key: &str, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        key: key.to_owned(),
        reason: reason.to_string(),
    }
}

/// Load and validate the record stored under `key`.
///
/// Returns `Ok(None)` when nothing is stored.
///
/// # Errors
///
/// Returns `Storage` if the backend fails, `UnsupportedVersion` for records
/// from a newer schema, and `Corrupt` for anything that does not decode into
/// a valid `T`, including stored bytes that are not text.
pub fn load<T: Record>(storage: &impl Storage, key: &str) -> Result<Option<T>> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(StorageError::InvalidData { reason, .. }) => return Err(corrupt(key, reason)),
        Err(e) => return Err(e.into()),
    };

    let value: Value = serde_json::from_str(&raw).map_err(|e| corrupt(key, e))?;
    let (version, state) = split_envelope(key, value)?;

    let record: T = serde_json::from_value(state).map_err(|e| corrupt(key, e))?;
    record.check().map_err(|reason| corrupt(key, reason))?;

    tracing::debug!(key, version, "Loaded record");
    Ok(Some(record))
}

/// Write `record` under `key` in the current schema version.
///
/// # Errors
///
/// Returns an error if encoding or the backend write fails.
pub fn save<T: Record>(storage: &impl Storage, key: &str, record: &T) -> Result<()> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        saved_at: Utc::now(),
        state: record,
    };
    let json = serde_json::to_string(&envelope)?;
    storage.set(key, &json)?;
    tracing::debug!(key, bytes = json.len(), "Saved record");
    Ok(())
}

/// Separate the schema version from the record body.
///
/// Any object carrying a `version` key is an envelope; records themselves
/// never have one. The version is checked before the body is looked at.
fn split_envelope(key: &str, value: Value) -> Result<(u32, Value)> {
    match value {
        Value::Object(mut map) if map.contains_key("version") => {
            let version = map
                .get("version")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| corrupt(key, "version is not a non-negative integer"))?;
            if version > SCHEMA_VERSION {
                return Err(StoreError::UnsupportedVersion {
                    key: key.to_owned(),
                    found: version,
                    supported: SCHEMA_VERSION,
                });
            }
            let state = map
                .remove("state")
                .ok_or_else(|| corrupt(key, "envelope has no state"))?;
            Ok((version, state))
        }
        bare => Ok((0, bare)),
    }
}
