//! Core types for Africlothing.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod catalog;
pub mod id;
pub mod price;

pub use catalog::{
    CatalogPage, Category, Paginated, PriceRange, Product, ProductImage, ProductVariant,
};
pub use id::*;
pub use price::{Price, PriceError};
