//! String-keyed persistence port.
//!
//! Feature modules never talk to SQLite directly. They read and write JSON
//! documents through [`KeyValueStore`], which lets tests swap in
//! [`MemoryStore`] or a mock.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MypaError;

/// Get/set/remove over string keys and string values.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceRead`] if the backend fails.
    fn get(&self, key: &str) -> Result<Option<String>, MypaError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceWrite`] if the backend fails.
    fn set(&self, key: &str, value: &str) -> Result<(), MypaError>;

    /// Delete `key`. Absent keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceWrite`] if the backend fails.
    fn remove(&self, key: &str) -> Result<(), MypaError>;
}

/// In-process store, used by tests and as a scratch backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MypaError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MypaError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), MypaError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Read a JSON document, falling back to `T::default()` when the key is
/// absent, the backend fails, or the payload does not parse.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    load_optional(store, key).unwrap_or_default()
}

/// Read a JSON document, returning `None` when the key is absent, the
/// backend fails, or the payload does not parse.
pub fn load_optional<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("{e}; using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("discarding unparsable value under {key}: {e}");
            None
        }
    }
}

/// Write a JSON document. Failures are logged and reported as `false`;
/// they never propagate.
pub fn save_logged<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            log::error!("failed to serialize {key}: {e}");
            return false;
        }
    };

    match store.set(key, &raw) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{e}");
            false
        }
    }
}

/// Delete a key. Failures are logged and reported as `false`.
pub fn remove_logged(store: &dyn KeyValueStore, key: &str) -> bool {
    match store.remove(key) {
        Ok(()) => true,
        Err(e) => {
            log::error!("{e}");
            false
        }
    }
}
