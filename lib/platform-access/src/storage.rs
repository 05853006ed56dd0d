//! Key-value storage backends for client-side persisted state.
//!
//! Session and preference state is persisted through the [`KeyValueStore`]
//! trait so the stores can be exercised against memory in tests, a JSON
//! file on native clients, and `localStorage` in the browser.
//!
//! Backends report failures. [`GuardedStore`] is the boundary that turns
//! those failures into degraded, memory-only behavior.

use drugledger_core::Result;
use rootcause::prelude::Report;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use tracing::warn;

use crate::error::StorageError;

/// A string key-value store.
///
/// Methods take `&self`: backends are handles onto storage owned
/// elsewhere (a browser origin, a file) and use interior mutability.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// In-memory store. Never fails; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn get_value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_value(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove_value(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get_value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_value(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_value(key);
        Ok(())
    }
}

/// Durable store backed by a JSON object in a single file.
///
/// Every operation reads the file, so several handles on the same path
/// observe each other's writes. A missing file is an empty store.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Creates a store persisting to `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn load(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::ReadFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
                .into());
            }
        };
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            StorageError::Corrupt {
                location: self.path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn save(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_failed = |reason: String| StorageError::WriteFailed {
            key: key.to_string(),
            reason,
        };
        let json = serde_json::to_string_pretty(entries).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load(key)?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load(key)?;
        entries.insert(key.to_string(), value.to_string());
        self.save(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load(key)?;
        if entries.remove(key).is_some() {
            self.save(key, &entries)?;
        }
        Ok(())
    }
}

/// Infallible wrapper around a backend.
///
/// Every operation is attempted against the backend first. A write or
/// remove the backend rejects is recorded in an in-memory overlay (a value
/// or a removal marker) that shadows the backend on later reads, so keys
/// the backend already holds stay visible and keys the backend rejected
/// still read back for the rest of the wrapper's lifetime. The first
/// failure marks the wrapper degraded and is logged once.
#[derive(Debug)]
pub struct GuardedStore<S> {
    backend: S,
    overlay: RefCell<BTreeMap<String, Option<String>>>,
    degraded: Cell<bool>,
}

impl<S: KeyValueStore> GuardedStore<S> {
    /// Wraps a backend.
    #[must_use]
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            overlay: RefCell::new(BTreeMap::new()),
            degraded: Cell::new(false),
        }
    }

    /// Returns true once a backend failure has left some state memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    fn degrade(&self, op: &str, key: &str, err: &Report<StorageError>) {
        if !self.degraded.replace(true) {
            warn!(op, key, error = %err, "storage failed, continuing in memory only");
        }
    }

    fn shadow(&self, key: &str, value: Option<&str>) {
        self.overlay
            .borrow_mut()
            .insert(key.to_string(), value.map(str::to_string));
    }

    fn unshadow(&self, key: &str) {
        self.overlay.borrow_mut().remove(key);
    }

    /// Reads a key. Failures read as absent.
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(shadowed) = self.overlay.borrow().get(key) {
            return shadowed.clone();
        }
        match self.backend.get(key) {
            Ok(value) => value,
            Err(err) => {
                self.degrade("get", key, &err);
                None
            }
        }
    }

    /// Writes a key.
    pub fn set(&self, key: &str, value: &str) {
        match self.backend.set(key, value) {
            Ok(()) => self.unshadow(key),
            Err(err) => {
                self.degrade("set", key, &err);
                self.shadow(key, Some(value));
            }
        }
    }

    /// Removes a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) {
        match self.backend.remove(key) {
            Ok(()) => self.unshadow(key),
            Err(err) => {
                self.degrade("remove", key, &err);
                self.shadow(key, None);
            }
        }
    }
}

/// Backend that fails every operation. Used to exercise degraded paths.
#[cfg(test)]
pub(crate) struct UnavailableStore;

#[cfg(test)]
impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable {
            reason: "disabled".to_string(),
        }
        .into())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable {
            reason: "disabled".to_string(),
        }
        .into())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable {
            reason: "disabled".to_string(),
        }
        .into())
    }
}

/// Backend that rejects writes to a set of keys, like a full quota.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RejectingStore {
    pub(crate) inner: MemoryStore,
    pub(crate) rejected: Vec<&'static str>,
    pub(crate) reject_removes: bool,
}

#[cfg(test)]
impl RejectingStore {
    pub(crate) fn rejecting(keys: &[&'static str]) -> Self {
        Self {
            rejected: keys.to_vec(),
            ..Self::default()
        }
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.rejected.contains(&key) {
            return Err(StorageError::WriteFailed {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
impl KeyValueStore for RejectingStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.reject_removes {
            return Err(StorageError::RemoveFailed {
                key: key.to_string(),
                reason: "read-only".to_string(),
            }
            .into());
        }
        self.inner.remove(key)
    }
}
