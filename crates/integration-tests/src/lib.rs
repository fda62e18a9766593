//! Integration tests for the storefront state stores.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-state-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart behaviour across reopened file-backed sessions
//! - `preferences_persistence` - Preference defaults and reloads
//! - `record_format` - On-disk layout, legacy records, and corruption handling
//! - `cart_properties` - Generated carts surviving a write and reload

use std::path::Path;

use rust_decimal::Decimal;
use storefront_state::{FileStorage, Session};
use storefront_state_core::CartItem;

/// A state directory that lives as long as the test.
pub struct TestContext {
    pub dir: tempfile::TempDir,
}

impl TestContext {
    /// Create a fresh, empty state directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.dir.path())
    }

    /// Open a session the way a new page load would.
    ///
    /// # Panics
    ///
    /// Panics if the session cannot be opened.
    #[must_use]
    pub fn open(&self) -> Session<FileStorage> {
        Session::open(self.storage()).expect("open session")
    }

    /// Read a raw record file.
    ///
    /// # Panics
    ///
    /// Panics if the file is missing or not valid JSON.
    #[must_use]
    pub fn read_record(&self, key: &str) -> serde_json::Value {
        let raw = std::fs::read_to_string(self.path().join(format!("{key}.json")))
            .expect("read record");
        serde_json::from_str(&raw).expect("parse record")
    }

    /// Write a raw record file, bypassing the stores.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_record(&self, key: &str, contents: &str) {
        std::fs::write(self.path().join(format!("{key}.json")), contents).expect("write record");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a fully populated line item.
#[must_use]
pub fn line_item(product_id: &str, quantity: u32, price: i64, name: &str) -> CartItem {
    CartItem::new(product_id, quantity, Decimal::from(price))
        .with_name(name)
        .with_image_url(format!("https://cdn.example.com/{product_id}.jpg"))
        .with_material("wood")
}
