//! The cart aggregate.
//!
//! `CartAggregate` holds the ordered line items and a cached total. Every
//! mutating operation recomputes the total before returning, and the
//! following invariants hold between calls:
//!
//! - at most one line per `(product.id, variant.id)`
//! - every line has `quantity >= 1`
//! - `total == Σ line.variant.price × line.quantity`
//!
//! The aggregate is pure state. Persistence lives in [`Cart`](crate::Cart).

use std::num::NonZeroU32;

use africlothing_core::{Price, Product, ProductId, ProductVariant, VariantId};
use serde::{Deserialize, Serialize, Serializer};

use crate::action::CartAction;
use crate::line::{CartLine, LineKey};

/// Line items plus their derived total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "StoredCart")]
pub struct CartAggregate {
    lines: Vec<CartLine>,
    #[serde(serialize_with = "serialize_total")]
    total: Price,
}

/// Shape of a stored cart before normalization.
///
/// The stored `total` is not read back; it is recomputed from the lines.
#[derive(Deserialize)]
struct StoredCart {
    lines: Vec<CartLine>,
}

/// Stored carts carry the total as a JSON number.
fn serialize_total<S: Serializer>(total: &Price, serializer: S) -> Result<S::Ok, S::Error> {
    rust_decimal::serde::float::serialize(&total.amount(), serializer)
}

impl From<StoredCart> for CartAggregate {
    fn from(stored: StoredCart) -> Self {
        let mut cart = Self::new();
        for line in stored.lines {
            // Zero-quantity rows cannot exist in a live cart
            let Some(quantity) = NonZeroU32::new(line.quantity) else {
                continue;
            };
            cart.merge_line(line.product, line.variant, quantity);
        }
        cart.recompute_total();
        cart
    }
}

impl CartAggregate {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            total: Price::ZERO,
        }
    }

    /// Parse a stored cart.
    ///
    /// Lines with zero quantity are dropped, repeated `(product, variant)`
    /// pairs are merged, and the total is recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a cart document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the cart as `{"lines": [...], "total": <number>}`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of every line's price times quantity.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Number of distinct lines (not the sum of quantities).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line with the given identity, if present.
    #[must_use]
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.position(key.product_id, &key.variant_id)
            .and_then(|index| self.lines.get(index))
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Add `quantity` units of a variant.
    ///
    /// Increments the existing line for `(product.id, variant.id)` or appends a
    /// new line holding snapshots of `product` and `variant`. Inventory is not
    /// checked.
    pub fn add(&mut self, product: Product, variant: ProductVariant, quantity: NonZeroU32) {
        self.merge_line(product, variant, quantity);
        self.recompute_total();
    }

    /// Remove the matching line. Does nothing if it is absent.
    pub fn remove(&mut self, product_id: ProductId, variant_id: &VariantId) {
        self.lines.retain(|line| !line.matches(product_id, variant_id));
        self.recompute_total();
    }

    /// Set the quantity of the matching line.
    ///
    /// Negative values count as zero and zero removes the line. Values above
    /// `u32::MAX` are clamped. Does nothing if the line is absent.
    pub fn set_quantity(&mut self, product_id: ProductId, variant_id: &VariantId, quantity: i64) {
        if let Some(index) = self.position(product_id, variant_id) {
            let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
            if clamped == 0 {
                self.lines.remove(index);
            } else if let Some(line) = self.lines.get_mut(index) {
                line.quantity = clamped;
            }
        }
        self.recompute_total();
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Price::ZERO;
    }

    /// Apply one intent.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add {
                product,
                variant,
                quantity,
            } => self.add(product, variant, quantity),
            CartAction::Remove {
                product_id,
                variant_id,
            } => self.remove(product_id, &variant_id),
            CartAction::SetQuantity {
                product_id,
                variant_id,
                quantity,
            } => self.set_quantity(product_id, &variant_id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, product_id: ProductId, variant_id: &VariantId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.matches(product_id, variant_id))
    }

    fn merge_line(&mut self, product: Product, variant: ProductVariant, quantity: NonZeroU32) {
        match self.position(product.id, &variant.id) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(quantity.get());
                }
            }
            None => self.lines.push(CartLine {
                product,
                variant,
                quantity: quantity.get(),
            }),
        }
    }

    fn recompute_total(&mut self) {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::fixtures::{product, variant};

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn vid(id: &str) -> VariantId {
        VariantId::new(id)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartAggregate::new();
        assert!(cart.is_empty());
        assert_eq!(cart.line_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
        assert_eq!(cart, CartAggregate::default());
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Price::from_cents(4000));
    }

    #[test]
    fn test_add_merges_same_product_and_variant() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(3));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.total(), Price::from_cents(10000));
    }

    #[test]
    fn test_add_keeps_first_snapshot_on_merge() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        // Catalog price changed since the first add
        cart.add(product(1), variant("tee-m", "25.00", 5), qty(1));

        assert_eq!(cart.lines()[0].variant.price, Price::from_cents(2000));
        assert_eq!(cart.total(), Price::from_cents(4000));
    }

    #[test]
    fn test_variant_identity_determines_uniqueness() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        cart.add(product(1), variant("tee-l", "22.50", 5), qty(1));

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total(), Price::from_cents(4250));
    }

    #[test]
    fn test_same_variant_id_on_different_products_is_distinct() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        cart.add(product(2), variant("tee-m", "20.00", 5), qty(1));

        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = CartAggregate::new();
        cart.add(product(3), variant("a", "1", 1), qty(1));
        cart.add(product(1), variant("b", "1", 1), qty(1));
        cart.add(product(3), variant("a", "1", 1), qty(1));
        cart.add(product(2), variant("c", "1", 1), qty(1));

        let ids: Vec<i32> = cart.lines().iter().map(|l| l.product.id.as_i32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_add_ignores_inventory() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "1.00", 1), qty(10));
        assert_eq!(cart.lines()[0].quantity, 10);
    }

    #[test]
    fn test_add_saturates_quantity() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "1.00", 1), qty(u32::MAX));
        cart.add(product(1), variant("tee-m", "1.00", 1), qty(5));
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_remove() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        cart.add(product(1), variant("tee-l", "22.50", 5), qty(1));

        cart.remove(ProductId::new(1), &vid("tee-m"));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].variant.id, vid("tee-l"));
        assert_eq!(cart.total(), Price::from_cents(2250));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        cart.add(product(2), variant("tee-m", "20.00", 5), qty(1));

        cart.remove(ProductId::new(1), &vid("tee-m"));
        let after_first = cart.clone();
        cart.remove(ProductId::new(1), &vid("tee-m"));
        assert_eq!(cart, after_first);
    }

    #[test]
    fn test_remove_absent_line_is_noop() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(1));
        let before = cart.clone();

        cart.remove(ProductId::new(9), &vid("tee-m"));
        cart.remove(ProductId::new(1), &vid("nope"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(5));

        cart.set_quantity(ProductId::new(1), &vid("tee-m"), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.total(), Price::from_cents(2000));

        cart.set_quantity(ProductId::new(1), &vid("tee-m"), 7);
        assert_eq!(cart.lines()[0].quantity, 7);
        assert_eq!(cart.total(), Price::from_cents(14000));
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut via_set = CartAggregate::new();
        via_set.add(product(1), variant("tee-m", "20.00", 5), qty(2));
        via_set.add(product(1), variant("tee-l", "22.50", 5), qty(1));
        let mut via_remove = via_set.clone();

        via_set.set_quantity(ProductId::new(1), &vid("tee-m"), 0);
        via_remove.remove(ProductId::new(1), &vid("tee-m"));
        assert_eq!(via_set, via_remove);
    }

    #[test]
    fn test_set_quantity_negative_removes() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));

        cart.set_quantity(ProductId::new(1), &vid("tee-m"), -4);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "0.01", 5), qty(1));

        cart.set_quantity(ProductId::new(1), &vid("tee-m"), i64::MAX);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_set_quantity_absent_line_is_noop() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));
        let before = cart.clone();

        cart.set_quantity(ProductId::new(1), &vid("tee-xl"), 3);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));
        cart.add(product(2), variant("tee-m", "20.00", 5), qty(2));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_line_lookup() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));

        let key = LineKey::new(ProductId::new(1), "tee-m");
        assert_eq!(cart.line(&key).unwrap().quantity, 2);
        assert!(cart.line(&LineKey::new(ProductId::new(1), "tee-l")).is_none());
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let mut cart = CartAggregate::new();
        cart.apply(CartAction::Add {
            product: product(1),
            variant: variant("tee-m", "20.00", 5),
            quantity: qty(2),
        });
        cart.apply(CartAction::SetQuantity {
            product_id: ProductId::new(1),
            variant_id: vid("tee-m"),
            quantity: 4,
        });
        assert_eq!(cart.total(), Price::from_cents(8000));

        cart.apply(CartAction::Remove {
            product_id: ProductId::new(1),
            variant_id: vid("tee-m"),
        });
        assert!(cart.is_empty());

        cart.apply(CartAction::Add {
            product: product(1),
            variant: variant("tee-m", "20.00", 5),
            quantity: qty(1),
        });
        cart.apply(CartAction::Clear);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_uses_decimal_arithmetic() {
        let mut cart = CartAggregate::new();
        // 0.1 + 0.2 is not 0.3 in binary floating point
        cart.add(product(1), variant("a", "0.10", 5), qty(1));
        cart.add(product(1), variant("b", "0.20", 5), qty(1));
        assert_eq!(cart.total(), Price::parse("0.30").unwrap());
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    #[test]
    fn test_json_shape() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));

        let value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        assert_eq!(value["total"].as_f64(), Some(40.0));
        assert_eq!(value["lines"][0]["quantity"], 2);
        assert_eq!(value["lines"][0]["variant"]["price"], "20.00");
        assert_eq!(value["lines"][0]["product"]["id"], 1);
    }

    #[test]
    fn test_json_round_trip() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "19.99", 5), qty(3));
        cart.add(product(2), variant("tee-l", "5.05", 5), qty(1));

        let restored = CartAggregate::from_json(&cart.to_json().unwrap()).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_from_json_recomputes_stale_total() {
        let mut cart = CartAggregate::new();
        cart.add(product(1), variant("tee-m", "20.00", 5), qty(2));

        let mut value: serde_json::Value = serde_json::from_str(&cart.to_json().unwrap()).unwrap();
        value["total"] = serde_json::json!(999.0);

        let restored = CartAggregate::from_json(&value.to_string()).unwrap();
        assert_eq!(restored.total(), Price::from_cents(4000));
    }

    #[test]
    fn test_from_json_normalizes_lines() {
        let line = |quantity: u32| CartLine {
            product: product(1),
            variant: variant("tee-m", "20.00", 5),
            quantity,
        };
        let other = CartLine {
            product: product(2),
            variant: variant("tee-m", "1.00", 5),
            quantity: 0,
        };
        let json = serde_json::json!({
            "lines": [line(2), other, line(3)],
        });

        let restored = CartAggregate::from_json(&json.to_string()).unwrap();
        assert_eq!(restored.line_count(), 1);
        assert_eq!(restored.lines()[0].quantity, 5);
        assert_eq!(restored.total(), Price::from_cents(10000));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(CartAggregate::from_json("").is_err());
        assert!(CartAggregate::from_json("not json").is_err());
        assert!(CartAggregate::from_json("{\"items\": []}").is_err());
        assert!(CartAggregate::from_json("[]").is_err());
    }
}
