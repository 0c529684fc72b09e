//! File-backed key/value store.
//!
//! Each key maps to `<root>/<key>.json`. Writes go to a uniquely named
//! temporary file in the same directory and are renamed into place, so a crash
//! mid-write never leaves a torn value. An abandoned temporary file is deleted
//! when it is dropped.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, validate_key};
use crate::error::StoreError;

/// A directory of JSON files, one per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The directory holding the files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` is not a valid storage key.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(value.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote store item");
        Ok(())
    }
}
