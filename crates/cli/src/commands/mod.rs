//! Command implementations.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use africlothing_cart::{ConfigError, StoreError};
use africlothing_core::{ProductId, VariantId};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The command needs a catalog file and none was given.
    #[error("No catalog file given (pass --catalog <file>)")]
    MissingCatalog,

    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog file is not a product list.
    #[error("Failed to parse catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The product is not in the catalog.
    #[error("Product {0} not found in catalog")]
    UnknownProduct(ProductId),

    /// The product has no such variant.
    #[error("Product {product_id} has no variant {variant_id}")]
    UnknownVariant {
        product_id: ProductId,
        variant_id: VariantId,
    },

    /// The cart store could not be opened.
    #[error("Cart storage error: {0}")]
    Store(#[from] StoreError),

    /// The cart changed in memory but the write to storage failed.
    #[error("Cart was updated but could not be saved to {0}")]
    NotSaved(String),
}
