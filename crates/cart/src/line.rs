//! Cart line items.

use africlothing_core::{Price, Product, ProductId, ProductVariant, VariantId};
use serde::{Deserialize, Serialize};

/// Composite identity of a cart line.
///
/// Two lines for the same product but different variants are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_id: VariantId,
}

impl LineKey {
    /// Create a key from its parts.
    #[must_use]
    pub fn new(product_id: ProductId, variant_id: impl Into<VariantId>) -> Self {
        Self {
            product_id,
            variant_id: variant_id.into(),
        }
    }
}

/// One row in the cart.
///
/// `product` and `variant` are snapshots taken when the line was added; later
/// catalog changes do not reach lines already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub variant: ProductVariant,
    pub quantity: u32,
}

impl CartLine {
    /// The line's composite identity.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product.id, self.variant.id.clone())
    }

    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, product_id: ProductId, variant_id: &VariantId) -> bool {
        self.product.id == product_id && &self.variant.id == variant_id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.variant.price.times(self.quantity)
    }

    /// Whether the snapshot's inventory allows one more unit.
    ///
    /// Display hint only; the cart never enforces inventory.
    #[must_use]
    pub const fn can_increment(&self) -> bool {
        self.quantity < self.variant.inventory_quantity
    }
}
