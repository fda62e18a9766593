//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! np-cart cart add --product-id A --quantity 2 --price 10 --name "Oak chair" --material wood
//! np-cart cart update A 5
//! np-cart cart remove A
//! np-cart cart show
//! np-cart cart checkout
//! ```

use storefront_state::{FileStorage, Session};
use storefront_state_core::CartItem;

use super::{CommandError, print_json};

/// Add an item, merging with an existing entry for the same product.
///
/// # Errors
///
/// Returns an error if the item is invalid or the cart cannot be written.
pub fn add(session: &mut Session<FileStorage>, item: CartItem) -> Result<(), CommandError> {
    let product_id = item.product_id.clone();
    session.cart_mut().add_item(item)?;

    let quantity = session
        .cart()
        .get(product_id.as_str())
        .map_or(0, |entry| entry.quantity);
    tracing::info!(%product_id, quantity, "Cart updated");
    log_totals(session);
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn remove(session: &mut Session<FileStorage>, product_id: &str) -> Result<(), CommandError> {
    session.cart_mut().remove_item(product_id)?;
    log_totals(session);
    Ok(())
}

/// Set a product's quantity; zero or less removes it.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn update(
    session: &mut Session<FileStorage>,
    product_id: &str,
    quantity: i64,
) -> Result<(), CommandError> {
    session.cart_mut().update_quantity(product_id, quantity)?;
    log_totals(session);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be written.
pub fn clear(session: &mut Session<FileStorage>) -> Result<(), CommandError> {
    session.cart_mut().clear_cart()?;
    tracing::info!("Cart cleared");
    Ok(())
}

/// Print the cart and its totals.
///
/// # Errors
///
/// Returns an error if output cannot be rendered.
pub fn show(session: &Session<FileStorage>) -> Result<(), CommandError> {
    print_json(&session.cart().summary())
}

/// Print the final cart and clear it.
///
/// # Errors
///
/// Returns an error if the cart cannot be written or output cannot be rendered.
pub fn checkout(session: &mut Session<FileStorage>) -> Result<(), CommandError> {
    let summary = session.checkout()?;
    print_json(&summary)
}

fn log_totals(session: &Session<FileStorage>) {
    let currency = session.preferences().currency();
    tracing::info!(
        total_items = session.cart().total_items(),
        total_price = %session.cart().total_price(),
        currency = currency.code(),
        "Cart totals"
    );
}
