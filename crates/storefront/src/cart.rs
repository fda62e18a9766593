//! Persisted shopping cart.
//!
//! [`CartStore`] owns the session's [`Cart`] and writes it through to storage
//! under [`keys::CART`] after every change. State is rehydrated when the store
//! is opened; it is only ever emptied by an explicit [`CartStore::clear_cart`].

use rust_decimal::Decimal;
use serde::Serialize;
use storefront_state_core::{Cart, CartItem};
use tracing::instrument;

use crate::error::Result;
use crate::persist::{self, keys};
use crate::storage::Storage;

/// Snapshot of the cart for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_price: Decimal,
}

/// Cart store backed by an injected [`Storage`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    cart: Cart,
}

impl<S: Storage> CartStore<S> {
    /// Open the store, rehydrating any persisted cart.
    ///
    /// An absent record yields an empty cart; nothing is written until the
    /// first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read or the stored record is
    /// corrupt or from a newer schema.
    pub fn open(storage: S) -> Result<Self> {
        let cart = persist::load(&storage, keys::CART)?.unwrap_or_default();
        Ok(Self { storage, cart })
    }

    /// Open the store, starting from an empty cart if the record is unusable.
    ///
    /// The bad record stays in storage until the next mutation overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error only if storage cannot be read.
    pub fn open_or_reset(storage: S) -> Result<Self> {
        let cart = match persist::load(&storage, keys::CART) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) if e.is_bad_record() => {
                tracing::warn!(error = %e, "Discarding unreadable cart");
                Cart::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self { storage, cart })
    }

    /// Discard in-memory state and rehydrate from storage.
    ///
    /// # Errors
    ///
    /// Same as [`CartStore::open`]. On error the in-memory cart is unchanged.
    pub fn reload(&mut self) -> Result<()> {
        self.cart = persist::load(&self.storage, keys::CART)?.unwrap_or_default();
        Ok(())
    }

    /// Add an item to the cart.
    ///
    /// If the product is already in the cart its quantity grows by
    /// `item.quantity`; the stored price and display fields are kept as they
    /// were on the first add. Items with a zero quantity are ignored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidItem` for a negative price, or a storage error if the
    /// write-through fails. A failed write leaves the in-memory change applied.
    #[instrument(skip(self, item), fields(product_id = %item.product_id, quantity = item.quantity))]
    pub fn add_item(&mut self, item: CartItem) -> Result<()> {
        if self.cart.add(item)? {
            self.persist()
        } else {
            tracing::debug!("Ignoring add with zero quantity");
            Ok(())
        }
    }

    /// Remove a product from the cart. Absent products are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &str) -> Result<()> {
        if self.cart.remove(product_id).is_some() {
            self.persist()
        } else {
            tracing::debug!("Product not in cart");
            Ok(())
        }
    }

    /// Set a product's quantity to exactly `quantity`.
    ///
    /// Zero or negative removes the product. Absent products are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<()> {
        if self.cart.set_quantity(product_id, quantity) {
            self.persist()
        } else {
            tracing::debug!("Cart unchanged");
            Ok(())
        }
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the write-through fails.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        self.persist()
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.cart.total_items()
    }

    /// Sum of `price × quantity` using the prices snapshotted at add time.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.cart.total_price()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.cart.get(product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Items and totals in one snapshot.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.cart.items().to_vec(),
            total_items: self.cart.total_items(),
            total_price: self.cart.total_price(),
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&self) -> Result<()> {
        persist::save(&self.storage, keys::CART, &self.cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::error::StoreError;
    use crate::storage::{MemoryStorage, StorageError};

    fn item(id: &str, quantity: u32, price: i64) -> CartItem {
        CartItem::new(id, quantity, Decimal::from(price))
    }

    /// Storage whose writes can be switched off.
    #[derive(Debug, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_writes: AtomicBool,
    }

    impl Storage for FlakyStorage {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::Unavailable("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> std::result::Result<(), StorageError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_open_empty_storage() {
        let storage = MemoryStorage::new();
        let store = CartStore::open(&storage).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total_items(), 0);
        // Opening alone writes nothing
        assert!(storage.is_empty());
    }

    #[test]
    fn test_add_same_product_twice() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();

        store
            .add_item(item("A", 2, 10).with_name("X").with_material("wood"))
            .unwrap();
        store
            .add_item(item("A", 3, 10).with_name("X").with_material("wood"))
            .unwrap();

        let entry = store.get("A").unwrap();
        assert_eq!(entry.quantity, 5);
        assert_eq!(entry.price, Decimal::from(10));
        assert_eq!(store.total_price(), Decimal::from(50));
    }

    #[test]
    fn test_mutations_survive_reopen() {
        let storage = MemoryStorage::new();
        {
            let mut store = CartStore::open(&storage).unwrap();
            store.add_item(item("A", 1, 3)).unwrap();
            store.add_item(item("B", 2, 4)).unwrap();
            store.add_item(item("C", 1, 5)).unwrap();
            store.update_quantity("B", 6).unwrap();
            store.remove_item("C").unwrap();
        }

        let store = CartStore::open(&storage).unwrap();
        let ids: Vec<&str> = store.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(store.get("B").unwrap().quantity, 6);
        assert_eq!(store.total_items(), 7);
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();
        store.add_item(item("A", 2, 1)).unwrap();
        store.add_item(item("B", 2, 1)).unwrap();

        store.update_quantity("A", 0).unwrap();
        store.update_quantity("B", -1).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_noops_do_not_write() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();

        store.remove_item("missing").unwrap();
        store.update_quantity("missing", 4).unwrap();
        store.add_item(item("A", 0, 1)).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_clear_cart_persists_empty_cart() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();
        store.add_item(item("A", 2, 10)).unwrap();
        store.clear_cart().unwrap();

        assert_eq!(store.total_items(), 0);
        assert_eq!(store.total_price(), Decimal::ZERO);
        let reopened = CartStore::open(&storage).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_negative_price_rejected_without_write() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();
        let result = store.add_item(item("A", 1, -5));
        assert!(matches!(result, Err(StoreError::InvalidItem(_))));
        assert!(store.is_empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_write_failure_is_reported_and_state_kept() {
        let storage = FlakyStorage::default();
        let mut store = CartStore::open(&storage).unwrap();
        storage.fail_writes.store(true, Ordering::SeqCst);

        let result = store.add_item(item("A", 1, 10));
        assert!(matches!(
            result,
            Err(StoreError::Storage(StorageError::Unavailable(_)))
        ));
        assert_eq!(store.total_items(), 1);

        storage.fail_writes.store(false, Ordering::SeqCst);
        store.update_quantity("A", 2).unwrap();
        let reopened = CartStore::open(&storage).unwrap();
        assert_eq!(reopened.get("A").unwrap().quantity, 2);
    }

    #[test]
    fn test_open_rejects_corrupt_record() {
        let storage = MemoryStorage::new();
        storage.set(keys::CART, "[]").unwrap();
        assert!(matches!(
            CartStore::open(&storage),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_open_or_reset_recovers_from_corrupt_record() {
        let storage = MemoryStorage::new();
        storage.set(keys::CART, "{\"items\": 7}").unwrap();

        let mut store = CartStore::open_or_reset(&storage).unwrap();
        assert!(store.is_empty());

        store.add_item(item("A", 1, 1)).unwrap();
        let reopened = CartStore::open(&storage).unwrap();
        assert_eq!(reopened.total_items(), 1);
    }

    #[test]
    fn test_reload_sees_other_writer() {
        let storage = MemoryStorage::new();
        let mut first = CartStore::open(&storage).unwrap();
        let mut second = CartStore::open(&storage).unwrap();

        second.add_item(item("A", 4, 2)).unwrap();
        assert!(first.is_empty());

        first.reload().unwrap();
        assert_eq!(first.total_items(), 4);
    }

    #[test]
    fn test_summary() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(&storage).unwrap();
        store.add_item(item("A", 2, 10)).unwrap();
        store.add_item(item("B", 1, 5)).unwrap();

        let summary = store.summary();
        assert_eq!(summary.items.len(), 2);
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_price, Decimal::from(25));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_items"], 3);
        assert_eq!(json["total_price"].as_f64(), Some(25.0));
    }
}
