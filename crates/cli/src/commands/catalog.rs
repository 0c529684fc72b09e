//! Catalog file commands.
//!
//! A catalog file is a saved response from the catalog API: either a bare
//! array of products or a paginated `{count, next, previous, results}` page.

use std::fs;
use std::path::Path;

use africlothing_core::{CatalogPage, Product, ProductId, ProductVariant, VariantId};
use tracing::info;

use super::CliError;

/// Read and parse a catalog file.
///
/// # Errors
///
/// Returns an error if no path is given or the file cannot be read or parsed.
pub fn load(path: Option<&Path>) -> Result<CatalogPage, CliError> {
    let path = path.ok_or(CliError::MissingCatalog)?;

    let contents = fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| CliError::CatalogParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Find a product and one of its variants.
///
/// # Errors
///
/// Returns an error if either is missing from the catalog.
pub fn resolve<'a>(
    catalog: &'a CatalogPage,
    product_id: ProductId,
    variant_id: &VariantId,
) -> Result<(&'a Product, &'a ProductVariant), CliError> {
    let product = catalog
        .product(product_id)
        .ok_or(CliError::UnknownProduct(product_id))?;
    let variant = product
        .variant(variant_id)
        .ok_or_else(|| CliError::UnknownVariant {
            product_id,
            variant_id: variant_id.clone(),
        })?;
    Ok((product, variant))
}

/// Log every product and variant in the catalog.
pub fn list(catalog: &CatalogPage) {
    let products = catalog.products();
    info!("{} products", products.len());

    for product in products {
        info!("{}", describe_product(product));
        if let Some(image) = product.primary_image() {
            info!("    image {image}");
        }

        for variant in &product.variants {
            let stock = if variant.is_in_stock() {
                format!("{} in stock", variant.inventory_quantity)
            } else {
                "out of stock".to_string()
            };
            info!("    {} size {} {} - {stock}", variant.id, variant.size, variant.price);
        }
    }
}

fn describe_product(product: &Product) -> String {
    let price = product
        .effective_price_range()
        .map_or_else(String::new, |range| {
            if range.is_single_price() {
                format!(" {}", range.min)
            } else {
                format!(" {} - {}", range.min, range.max)
            }
        });
    format!(
        "[{}] {} ({}){price}",
        product.id, product.name, product.category.name
    )
}
