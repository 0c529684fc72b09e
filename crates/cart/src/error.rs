//! Errors for cart storage, hydration and persistence.
//!
//! None of these reach callers of the cart operations. Hydration errors turn
//! into an empty cart and persistence errors are logged; the types exist so the
//! log lines carry a precise cause and so store backends have a real `Result`.

use thiserror::Error;

/// Errors from a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key {key:?}: {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The backend refused the operation (e.g., quota exceeded).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors while reading the stored cart at startup.
#[derive(Debug, Error)]
pub enum HydrateError {
    /// The stored value could not be read.
    #[error("failed to read stored cart: {0}")]
    Store(#[from] StoreError),

    /// The stored value is not a valid cart.
    #[error("failed to parse stored cart: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors while writing the cart after a mutation.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The cart could not be serialized.
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The store rejected the write.
    #[error("failed to save cart: {0}")]
    Store(#[from] StoreError),
}
