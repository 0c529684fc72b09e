//! Read-only reductions over the cart for display.
//!
//! Nothing here feeds back into the aggregate: the badge count and the order
//! summary are derived on demand from the current lines and total.

use africlothing_core::Price;
use rust_decimal::Decimal;

use crate::aggregate::CartAggregate;
use crate::line::CartLine;

/// Total units across all lines, as shown on the cart badge.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u64 {
    lines.iter().map(|line| u64::from(line.quantity)).sum()
}

/// Shipping and tax settings for the order summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryRates {
    /// Charged once when the cart is not empty.
    pub flat_shipping: Price,
    /// Fraction of the subtotal (e.g. `0.08` for 8%).
    pub tax_rate: Decimal,
}

impl Default for SummaryRates {
    fn default() -> Self {
        Self {
            flat_shipping: Price::from_cents(599),
            tax_rate: Decimal::new(8, 2),
        }
    }
}

/// Subtotal, shipping, tax and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSummary {
    pub item_count: u64,
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Summarize `cart` using `rates`.
    #[must_use]
    pub fn compute(cart: &CartAggregate, rates: &SummaryRates) -> Self {
        let subtotal = cart.total();
        let shipping = if subtotal.is_zero() {
            Price::ZERO
        } else {
            rates.flat_shipping
        };
        let tax = subtotal.scaled(rates.tax_rate);

        Self {
            item_count: item_count(cart.lines()),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Whether no shipping is charged.
    #[must_use]
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
