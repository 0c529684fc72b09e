//! Catalog entities as served by the storefront API.
//!
//! These mirror the JSON the catalog endpoints return. Optional fields are
//! omitted by list endpoints and filled in by detail endpoints, so they stay
//! `Option` and default when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, ProductImageId, VariantId};
use super::price::Price;

// =============================================================================
// Categories & Images
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Number of products in the category at fetch time.
    #[serde(default)]
    pub product_count: u32,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ProductImageId,
    /// Image URL.
    pub image: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt_text: String,
    /// Whether this is the product's primary image.
    #[serde(default)]
    pub is_main: bool,
}

// =============================================================================
// Variants
// =============================================================================

/// A purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Unique within the owning product only.
    pub id: VariantId,
    /// Size label (e.g., "M", "XL").
    pub size: String,
    /// Unit price, serialized as a decimal string.
    pub price: Price,
    /// Units available at fetch time.
    #[serde(default)]
    pub inventory_quantity: u32,
}

impl ProductVariant {
    /// Whether any units were available when the catalog was fetched.
    #[must_use]
    pub const fn is_in_stock(&self) -> bool {
        self.inventory_quantity > 0
    }
}

/// Lowest and highest variant price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// Whether every variant costs the same.
    #[must_use]
    pub fn is_single_price(&self) -> bool {
        self.min == self.max
    }
}

// =============================================================================
// Products
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// URL handle.
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_sizes: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Look up one of this product's variants.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&ProductVariant> {
        self.variants.iter().find(|variant| &variant.id == id)
    }

    /// URL of the image to show for this product.
    ///
    /// Prefers `main_image`, then the image flagged `is_main`, then the first
    /// image in the gallery.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        if let Some(url) = self.main_image.as_deref() {
            return Some(url);
        }

        let images = self.images.as_deref()?;
        images
            .iter()
            .find(|img| img.is_main)
            .or_else(|| images.first())
            .map(|img| img.image.as_str())
    }

    /// The stored price range, or one derived from the variants.
    ///
    /// Returns `None` when there is no stored range and no variants.
    #[must_use]
    pub fn effective_price_range(&self) -> Option<PriceRange> {
        if self.price_range.is_some() {
            return self.price_range;
        }

        let mut prices = self.variants.iter().map(|variant| variant.price);
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(min, max), price| {
            (min.min(price), max.max(price))
        });
        Some(PriceRange { min, max })
    }

    /// Whether any variant has inventory.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.variants.iter().any(ProductVariant::is_in_stock)
    }
}

// =============================================================================
// Catalog Responses
// =============================================================================

/// Paginated list envelope used by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// A saved catalog listing: either a bare product array or one API page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogPage {
    Products(Vec<Product>),
    Page(Paginated<Product>),
}

impl CatalogPage {
    /// The products in this listing.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            Self::Products(products) => products,
            Self::Page(page) => &page.results,
        }
    }

    /// Find a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products().iter().find(|product| product.id == id)
    }
}
