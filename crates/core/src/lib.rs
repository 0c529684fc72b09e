//! Africlothing Core - Shared catalog types.
//!
//! This crate provides the value types the rest of the workspace exchanges:
//! - `cart` - The persisted shopping cart aggregate
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. Products and variants arrive from the catalog API as JSON and are
//! decoded straight into these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, decimal prices, and catalog entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
