//! Integration tests for the on-disk record layout.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use storefront_state::persist::{SCHEMA_VERSION, keys};
use storefront_state::{Session, StoreError};
use storefront_state_core::{Currency, Language};
use storefront_state_integration_tests::{TestContext, line_item};

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_cart_record_layout() {
    let ctx = TestContext::new();
    let mut session = ctx.open();
    session.cart_mut().add_item(line_item("A", 2, 10, "X")).unwrap();

    let record = ctx.read_record(keys::CART);
    assert_eq!(record["version"], SCHEMA_VERSION);
    let item = &record["state"]["items"][0];
    assert_eq!(item["product_id"], "A");
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["price"].as_f64(), Some(10.0));
    assert_eq!(item["name"], "X");
    assert_eq!(item["image_url"], "https://cdn.example.com/A.jpg");
    assert_eq!(item["material"], "wood");
}

#[test]
fn test_preferences_record_layout() {
    let ctx = TestContext::new();
    let mut session = ctx.open();
    session
        .preferences_mut()
        .set_language(Language::Spanish)
        .unwrap();

    let record = ctx.read_record(keys::PREFERENCES);
    assert_eq!(record["state"]["language"], "Spanish");
    assert_eq!(record["state"]["currency"], "Dollar");
}

// =============================================================================
// Legacy Records
// =============================================================================

#[test]
fn test_reads_unversioned_records() {
    let ctx = TestContext::new();
    ctx.write_record(
        keys::CART,
        r#"{"items":[{"product_id":"A","quantity":2,"price":10,"name":"X","image_url":"","material":"wood"},{"product_id":"B","quantity":1,"price":2.5,"name":"Y","image_url":"","material":"cotton"}]}"#,
    );
    ctx.write_record(keys::PREFERENCES, r#"{"language":"French","currency":"Rupees"}"#);

    let session = ctx.open();
    assert_eq!(session.cart().total_items(), 3);
    assert_eq!(session.cart().total_price(), Decimal::new(225, 1));
    assert_eq!(session.preferences().language(), Language::French);
    assert_eq!(session.preferences().currency(), Currency::Rupees);
}

#[test]
fn test_first_write_upgrades_legacy_record() {
    let ctx = TestContext::new();
    ctx.write_record(keys::PREFERENCES, r#"{"language":"French","currency":"Rupees"}"#);

    let mut session = ctx.open();
    session
        .preferences_mut()
        .set_currency(Currency::Euro)
        .unwrap();

    let record = ctx.read_record(keys::PREFERENCES);
    assert_eq!(record["version"], SCHEMA_VERSION);
    assert_eq!(record["state"]["language"], "French");
    assert_eq!(record["state"]["currency"], "Euro");
}

// =============================================================================
// Corruption
// =============================================================================

#[test]
fn test_corrupt_cart_fails_open() {
    let ctx = TestContext::new();
    ctx.write_record(
        keys::CART,
        r#"{"items":[{"product_id":"A","quantity":0,"price":10,"name":"","image_url":"","material":""}]}"#,
    );

    let result = Session::open(ctx.storage());
    assert!(matches!(result, Err(StoreError::Corrupt { .. })));
}

#[test]
fn test_newer_schema_fails_open() {
    let ctx = TestContext::new();
    ctx.write_record(
        keys::PREFERENCES,
        r#"{"version":7,"state":{"language":"English","currency":"Dollar"}}"#,
    );

    let result = Session::open(ctx.storage());
    assert!(matches!(
        result,
        Err(StoreError::UnsupportedVersion { found: 7, .. })
    ));
}

#[test]
fn test_newer_schema_with_unknown_body_fails_open() {
    let ctx = TestContext::new();
    ctx.write_record(keys::CART, r#"{"version":2,"data":{"lines":[]}}"#);

    let result = Session::open(ctx.storage());
    assert!(matches!(
        result,
        Err(StoreError::UnsupportedVersion { found: 2, .. })
    ));
}

#[test]
fn test_binary_cart_file_is_corrupt() {
    let ctx = TestContext::new();
    std::fs::write(ctx.path().join("cart-storage.json"), [0xff, 0xfe, 0x00]).unwrap();

    let result = Session::open(ctx.storage());
    assert!(matches!(result, Err(StoreError::Corrupt { .. })));
}

#[test]
fn test_open_or_reset_recovers_binary_cart_file() {
    let ctx = TestContext::new();
    std::fs::write(ctx.path().join("cart-storage.json"), [0xff, 0xfe]).unwrap();

    let mut session = Session::open_or_reset(ctx.storage()).unwrap();
    assert!(session.cart().is_empty());

    session.cart_mut().add_item(line_item("A", 1, 5, "a")).unwrap();
    assert_eq!(ctx.open().cart().total_items(), 1);
}

#[test]
fn test_open_or_reset_keeps_good_record() {
    let ctx = TestContext::new();
    ctx.write_record(keys::CART, "not json at all");
    ctx.write_record(keys::PREFERENCES, r#"{"language":"Spanish","currency":"Euro"}"#);

    let mut session = Session::open_or_reset(ctx.storage()).unwrap();
    assert!(session.cart().is_empty());
    assert_eq!(session.preferences().language(), Language::Spanish);

    session.cart_mut().add_item(line_item("A", 1, 5, "a")).unwrap();
    let reloaded = ctx.open();
    assert_eq!(reloaded.cart().total_items(), 1);
}
