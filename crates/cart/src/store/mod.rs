//! Local-storage style key/value persistence.
//!
//! The cart persists itself as a single string value under a single key. The
//! [`KeyValueStore`] trait is that contract; backends decide where the value
//! actually lives.
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, for tests and ephemeral carts
//! - [`FileStore`] - One JSON file per key under a root directory

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

/// Reject keys that are empty or could escape a backend's namespace.
pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let reason = if key.is_empty() {
        "must not be empty"
    } else if key.contains(['/', '\\']) {
        "must not contain path separators"
    } else if key == "." || key == ".." {
        "must not be a relative path component"
    } else if key.chars().any(char::is_control) {
        "must not contain control characters"
    } else {
        return Ok(());
    };

    Err(StoreError::InvalidKey {
        key: key.to_owned(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_accepts_plain_keys() {
        assert!(validate_key("africlothing-cart").is_ok());
        assert!(validate_key("cart.v2").is_ok());
    }

    #[test]
    fn test_validate_key_rejects_unsafe_keys() {
        for key in ["", "a/b", "a\\b", ".", "..", "cart\n"] {
            assert!(
                matches!(validate_key(key), Err(StoreError::InvalidKey { .. })),
                "expected {key:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write<S: KeyValueStore>(mut store: S) {
            store.set_item("k", "v").ok();
        }

        let mut store = MemoryStore::new();
        write(&mut store);
        assert_eq!(store.get_item("k").ok().flatten().as_deref(), Some("v"));
    }
}
