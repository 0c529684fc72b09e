//! Cart intents.
//!
//! The UI layer describes what the shopper did as a `CartAction` and hands it
//! to [`Cart::dispatch`](crate::Cart::dispatch), one at a time.

use std::num::NonZeroU32;

use africlothing_core::{Product, ProductId, ProductVariant, VariantId};

/// A mutating cart intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add units of a variant, merging with an existing line.
    Add {
        product: Product,
        variant: ProductVariant,
        quantity: NonZeroU32,
    },
    /// Drop a line.
    Remove {
        product_id: ProductId,
        variant_id: VariantId,
    },
    /// Overwrite a line's quantity; zero or less removes it.
    SetQuantity {
        product_id: ProductId,
        variant_id: VariantId,
        quantity: i64,
    },
    /// Empty the cart.
    Clear,
}

impl CartAction {
    /// Short name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::SetQuantity { .. } => "set_quantity",
            Self::Clear => "clear",
        }
    }
}
