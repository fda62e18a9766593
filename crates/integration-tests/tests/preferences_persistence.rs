//! Integration tests for the preference store over file-backed storage.

#![allow(clippy::unwrap_used)]

use storefront_state_core::{Currency, Language, Preferences};
use storefront_state_integration_tests::{TestContext, line_item};

#[test]
fn test_defaults_on_first_load() {
    let ctx = TestContext::new();
    let session = ctx.open();
    assert_eq!(
        session.preferences().preferences(),
        Preferences {
            language: Language::English,
            currency: Currency::Dollar,
        }
    );
}

#[test]
fn test_set_currency_survives_reload() {
    let ctx = TestContext::new();
    let mut session = ctx.open();
    session
        .preferences_mut()
        .set_currency(Currency::Euro)
        .unwrap();
    drop(session);

    let reloaded = ctx.open();
    assert_eq!(reloaded.preferences().currency(), Currency::Euro);
    assert_eq!(reloaded.preferences().language(), Language::English);
}

#[test]
fn test_currency_does_not_convert_cart_prices() {
    let ctx = TestContext::new();
    let mut session = ctx.open();
    session.cart_mut().add_item(line_item("A", 2, 10, "a")).unwrap();
    let before = session.cart().total_price();

    session
        .preferences_mut()
        .set_currency(Currency::Rupees)
        .unwrap();

    assert_eq!(session.cart().total_price(), before);
    assert_eq!(ctx.open().cart().total_price(), before);
}

#[test]
fn test_reset_removes_both_records() {
    let ctx = TestContext::new();
    let mut session = ctx.open();
    session.cart_mut().add_item(line_item("A", 1, 1, "a")).unwrap();
    session
        .preferences_mut()
        .set_language(Language::French)
        .unwrap();

    session.reset().unwrap();

    assert!(!ctx.path().join("cart-storage.json").exists());
    assert!(!ctx.path().join("preferences-storage.json").exists());
    let reloaded = ctx.open();
    assert!(reloaded.cart().is_empty());
    assert_eq!(reloaded.preferences().language(), Language::English);
}
