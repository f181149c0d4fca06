//! Storage collaborators for persisted option blobs.
//!
//! An [`OptionStore`](crate::OptionStore) never touches the filesystem itself;
//! it hands a serialized JSON object to a [`Storage`] under its storage key and
//! asks for it back on load.
//!
//! - [`MemoryStorage`] keeps blobs in a map (tests, hosts with their own persistence)
//! - [`FileStorage`] writes one `<key>.json` file per storage key

use crate::error::StorageError;
use crate::paths;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A key/value store for option blobs.
pub trait Storage {
    /// Reads the blob stored under `key`, or `None` if nothing was stored.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `data` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, data: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        (**self).save(key, data)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        (**self).save(key, data)
    }
}

/// In-memory storage.
///
/// Counts successful saves so callers can check how often a store persisted.
///
/// # Example
///
/// ```rust
/// use optsmith_config::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// storage.save("opts", r#"{"number":7}"#).unwrap();
/// assert_eq!(storage.get("opts"), Some(r#"{"number":7}"#));
/// assert_eq!(storage.save_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blobs: HashMap<String, String>,
    saves: usize,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-populate a blob without counting it as a save.
    pub fn with_blob(mut self, key: impl Into<String>, data: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), data.into());
        self
    }

    /// The blob stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Number of successful [`Storage::save`] calls.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), data.to_string());
        self.saves += 1;
        Ok(())
    }
}

/// File-backed storage: one JSON file per storage key inside a directory.
///
/// The directory is created on the first save.
///
/// # Example
///
/// ```rust,no_run
/// use optsmith_config::{FileStorage, Storage};
///
/// let mut storage = FileStorage::user_default();
/// storage.save("delay-options", r#"{"mix":40}"#)?;
/// # Ok::<(), optsmith_config::StorageError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at [`paths::user_storage_dir`].
    pub fn user_default() -> Self {
        Self::new(paths::user_storage_dir())
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file a blob stored under `key` lives in.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidKey`] if the key would leave the directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !paths::is_valid_storage_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(paths::storage_file(&self.dir, key))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::read(path, e)),
        }
    }

    fn save(&mut self, key: &str, data: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::create_dir(parent, e))?;
        }

        std::fs::write(&path, data).map_err(|e| StorageError::write(&path, e))
    }
}
