//! Cart line items and the ordered cart they live in.
//!
//! The [`Cart`] here is pure data plus its mutation rules. Persistence is the
//! job of the `storefront-state` crate, which wraps a `Cart` in a store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors that make a single [`CartItem`] invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartItemError {
    /// A line item must hold at least one unit.
    #[error("quantity for {0} must be at least 1")]
    ZeroQuantity(ProductId),
    /// Unit prices cannot be negative.
    #[error("price for {product_id} cannot be negative (got {price})")]
    NegativePrice {
        product_id: ProductId,
        price: Decimal,
    },
}

/// Errors that make a whole [`Cart`] invalid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error(transparent)]
    Item(#[from] CartItemError),
    /// Two entries share a product ID.
    #[error("duplicate entry for product {0}")]
    DuplicateProduct(ProductId),
}

/// A cart entry.
///
/// `price`, `name`, `image_url` and `material` are snapshots taken when the
/// product was added; they are not refreshed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price, serialized as an exact JSON number.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub name: String,
    pub image_url: String,
    pub material: String,
}

impl CartItem {
    /// Create a line item with empty display fields.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, quantity: u32, price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
            price,
            name: String::new(),
            image_url: String::new(),
            material: String::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// Set the material label.
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// `price × quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Check the item-level invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity is zero or the price is negative.
    pub fn validate(&self) -> Result<(), CartItemError> {
        if self.quantity == 0 {
            return Err(CartItemError::ZeroQuantity(self.product_id.clone()));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(CartItemError::NegativePrice {
                product_id: self.product_id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}

/// Ordered collection of line items, at most one per product.
///
/// Insertion order is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from items, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate product ID or an invalid item.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        let cart = Self { items };
        cart.validate()?;
        Ok(cart)
    }

    /// Check that no product appears twice and every item is valid.
    ///
    /// # Errors
    ///
    /// Returns the first violation found, in item order.
    pub fn validate(&self) -> Result<(), CartError> {
        let mut seen = std::collections::HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.validate()?;
            if !seen.insert(item.product_id.as_str()) {
                return Err(CartError::DuplicateProduct(item.product_id.clone()));
            }
        }
        Ok(())
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the entry for a product.
    #[must_use]
    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items
            .iter()
            .find(|item| item.product_id.as_str() == product_id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging with an existing entry for the same product.
    ///
    /// When the product is already present only its quantity grows (saturating);
    /// the existing price and display fields are kept. Items with a zero
    /// quantity are ignored. Returns `true` if the cart changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the item has a negative price.
    pub fn add(&mut self, item: CartItem) -> Result<bool, CartItemError> {
        if item.quantity == 0 {
            return Ok(false);
        }
        item.validate()?;

        if let Some(existing) = self.get_mut(item.product_id.as_str()) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        Ok(true)
    }

    /// Remove the entry for a product. Returns the removed item, if any.
    pub fn remove(&mut self, product_id: &str) -> Option<CartItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id.as_str() == product_id)?;
        Some(self.items.remove(index))
    }

    /// Set an entry's quantity to an exact value.
    ///
    /// A quantity of zero or less removes the entry. Values above `u32::MAX`
    /// are clamped. Returns `true` if the cart changed.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id).is_some();
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.get_mut(product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `price × quantity` over all entries, using snapshotted prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.line_total()))
    }

    fn get_mut(&mut self, product_id: &str) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id.as_str() == product_id)
    }
}
