//! Integration tests for the Africlothing cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p africlothing-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Hydration and write-through against real stores
//! - `cart_properties` - Property tests over random operation sequences
//!
//! This library holds the catalog builders the test files share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use africlothing_core::{Category, CategoryId, Price, Product, ProductId, ProductVariant, VariantId};
use chrono::{DateTime, TimeZone, Utc};

/// Fixed creation time so fixtures compare equal across calls.
#[must_use]
pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A variant with the given id and unit price in cents.
#[must_use]
pub fn variant(id: &str, size: &str, cents: u32) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(id),
        size: size.to_string(),
        price: Price::from_cents(cents),
        inventory_quantity: 10,
    }
}

/// A product in the "Dresses" category carrying `variants`.
#[must_use]
pub fn product(id: i32, name: &str, variants: Vec<ProductVariant>) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        description: None,
        category: Category {
            id: CategoryId::new(1),
            name: "Dresses".to_string(),
            slug: "dresses".to_string(),
            description: String::new(),
            product_count: 1,
        },
        main_image: None,
        images: None,
        variants,
        price_range: None,
        available_sizes: None,
        created_at: created_at(),
    }
}

/// A small fixed catalog: two products, the first with two sizes.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        product(
            1,
            "Ankara Wrap Dress",
            vec![variant("awd-s", "S", 8900), variant("awd-m", "M", 8900)],
        ),
        product(2, "Kente Shirt", vec![variant("ks-l", "L", 4550)]),
    ]
}

/// Install a test subscriber so `tracing` output shows with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("africlothing_cart=debug")
        .with_test_writer()
        .try_init();
}
