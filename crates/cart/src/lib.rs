//! Africlothing Cart - The persisted shopping cart.
//!
//! The cart is an aggregate of line items keyed by `(product, variant)`, with a
//! total that is recomputed after every mutation. [`Cart`] owns the aggregate
//! and writes it to a [`KeyValueStore`] after each transition, and hydrates
//! from the same key on construction.
//!
//! # Modules
//!
//! - [`aggregate`] - `CartAggregate` and its operations
//! - [`action`] - Reducer-style `CartAction` intents
//! - [`line`] - `CartLine` and its composite `LineKey`
//! - [`store`] - Local-storage style key/value backends
//! - [`persisted`] - `Cart`, the aggregate plus its persistence hook
//! - [`summary`] - Order summary and cart badge reductions
//! - [`config`] - Environment configuration
//! - [`error`] - Storage, hydration and persistence errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod action;
pub mod aggregate;
pub mod config;
pub mod error;
pub mod line;
pub mod persisted;
pub mod store;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use action::CartAction;
pub use aggregate::CartAggregate;
pub use config::{CartConfig, ConfigError};
pub use error::{HydrateError, PersistError, StoreError};
pub use line::{CartLine, LineKey};
pub use persisted::Cart;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use summary::{OrderSummary, SummaryRates, item_count};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "africlothing-cart";
