//! In-memory key/value store.

use std::collections::HashMap;

use super::{KeyValueStore, validate_key};
use crate::error::StoreError;

/// A `HashMap`-backed store.
///
/// Writes can be switched off with [`set_fail_writes`](Self::set_fail_writes)
/// to stand in for a full or unavailable browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with one value.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.items.insert(key.into(), value.into());
        store
    }

    /// Make every subsequent write fail with
    /// [`StoreError::Unavailable`].
    pub const fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_writable()?;
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
