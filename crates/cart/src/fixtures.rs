//! Catalog builders shared by the unit tests.

#![allow(clippy::unwrap_used)]

use africlothing_core::{Category, CategoryId, Price, Product, ProductId, ProductVariant, VariantId};
use chrono::{TimeZone, Utc};

pub fn variant(id: &str, price: &str, inventory: u32) -> ProductVariant {
    ProductVariant {
        id: VariantId::new(id),
        size: id.rsplit('-').next().unwrap_or(id).to_uppercase(),
        price: Price::parse(price).unwrap(),
        inventory_quantity: inventory,
    }
}

pub fn product(id: i32) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        slug: format!("product-{id}"),
        description: None,
        category: Category {
            id: CategoryId::new(1),
            name: "Tops".to_string(),
            slug: "tops".to_string(),
            description: String::new(),
            product_count: 1,
        },
        main_image: None,
        images: None,
        variants: vec![variant("tee-m", "20.00", 5), variant("tee-l", "22.50", 5)],
        price_range: None,
        available_sizes: None,
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}
