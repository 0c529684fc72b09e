//! Cart commands.
//!
//! Each invocation hydrates the cart from the file store, applies at most one
//! mutation (which persists it), and logs the result.

use std::num::NonZeroU32;

use africlothing_cart::{
    Cart, CartConfig, CartLine, FileStore, KeyValueStore, OrderSummary, SummaryRates, item_count,
};
use africlothing_core::{CatalogPage, ProductId, VariantId};
use tracing::{info, warn};

use super::CliError;
use super::catalog::resolve;

/// Open the cart stored at the configured location.
///
/// # Errors
///
/// Returns an error if the storage directory cannot be created.
pub fn open(config: &CartConfig) -> Result<Cart<FileStore>, CliError> {
    let store = FileStore::open(&config.storage_dir)?;
    Ok(Cart::hydrate(store, config.storage_key.clone()))
}

/// Log the cart's lines and total.
pub fn show<S: KeyValueStore>(cart: &Cart<S>) {
    if cart.line_count() == 0 {
        info!("Your cart is empty");
        return;
    }

    info!("Shopping Cart ({} items)", item_count(cart.lines()));
    for line in cart.lines() {
        info!("  {}", describe_line(line));
    }
    info!("Total: {}", cart.total());
}

/// Add a catalog variant to the cart.
///
/// # Errors
///
/// Returns an error if the product or variant is not in the catalog.
pub fn add<S: KeyValueStore>(
    cart: &mut Cart<S>,
    catalog: &CatalogPage,
    product_id: ProductId,
    variant_id: &VariantId,
    quantity: NonZeroU32,
) -> Result<(), CliError> {
    let (product, variant) = resolve(catalog, product_id, variant_id)?;

    let requested = quantity.get();
    let in_cart = cart
        .lines()
        .iter()
        .find(|line| line.matches(product_id, variant_id))
        .map_or(0, |line| line.quantity);
    if in_cart.saturating_add(requested) > variant.inventory_quantity {
        warn!(
            available = variant.inventory_quantity,
            in_cart, requested, "Quantity exceeds listed inventory"
        );
    }

    cart.add(product.clone(), variant.clone(), quantity);
    info!("Added {requested} x {} ({})", product.name, variant.size);
    show(cart);
    Ok(())
}

/// Remove a line from the cart.
pub fn remove<S: KeyValueStore>(cart: &mut Cart<S>, product_id: ProductId, variant_id: &VariantId) {
    let before = cart.line_count();
    cart.remove(product_id, variant_id);
    if cart.line_count() == before {
        info!("No line for product {product_id} variant {variant_id}");
    } else {
        info!("Removed product {product_id} variant {variant_id}");
    }
    show(cart);
}

/// Set a line's quantity.
pub fn set_quantity<S: KeyValueStore>(
    cart: &mut Cart<S>,
    product_id: ProductId,
    variant_id: &VariantId,
    quantity: i64,
) {
    cart.set_quantity(product_id, variant_id, quantity);
    show(cart);
}

/// Empty the cart.
pub fn clear<S: KeyValueStore>(cart: &mut Cart<S>) {
    cart.clear();
    info!("Cart cleared");
}

/// Log the order summary.
pub fn summary<S: KeyValueStore>(cart: &Cart<S>, rates: &SummaryRates) {
    let summary = OrderSummary::compute(cart.aggregate(), rates);
    if summary.item_count == 0 {
        info!("Your cart is empty");
        return;
    }

    info!("Order Summary ({} items)", summary.item_count);
    info!("  Subtotal  {}", summary.subtotal);
    if summary.is_free_shipping() {
        info!("  Shipping  Free");
    } else {
        info!("  Shipping  {}", summary.shipping);
    }
    info!("  Tax       {}", summary.tax);
    info!("  Total     {}", summary.total);
}

/// Fail the command if the last write did not reach storage.
///
/// # Errors
///
/// Returns [`CliError::NotSaved`] when the cart's most recent write failed.
pub fn report_persistence<S: KeyValueStore>(cart: &Cart<S>) -> Result<(), CliError> {
    if cart.last_persist_failed() {
        return Err(CliError::NotSaved(cart.key().to_string()));
    }
    Ok(())
}

/// One-line description of a cart line.
fn describe_line(line: &CartLine) -> String {
    format!(
        "[{}/{}] {} - size {} - {} x {} = {}",
        line.product.id,
        line.variant.id,
        line.product.name,
        line.variant.size,
        line.quantity,
        line.variant.price,
        line.line_total()
    )
}
