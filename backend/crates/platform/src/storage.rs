//! Key-Value Storage Infrastructure
//!
//! A small storage abstraction standing in for the browser's session and
//! local storage. Callers receive the store as an explicit dependency so
//! tests can run against the in-memory implementation directly instead of
//! reaching for ambient global state.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A string-to-string key-value slot store
///
/// Implementations are expected to be cheap to clone and safe to share
/// across tasks. Operations are infallible: a missing key reads as `None`,
/// writes overwrite silently (last write wins).
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, overwriting any previous one
    fn put(&self, key: &str, value: &str);

    /// Delete a value; deleting a missing key is a no-op
    fn remove(&self, key: &str);
}

/// In-memory store
///
/// The only process-local implementation; also the test fake.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries (all scopes)
    pub fn len(&self) -> usize {
        self.entries.read().expect("storage lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .expect("storage lock poisoned")
            .remove(key);
    }
}

/// A view of another store with every key prefixed by a scope
///
/// Used to give each browser session its own slice of a shared store,
/// the way per-tab session storage isolates one tab from another.
#[derive(Debug, Clone)]
pub struct ScopedStore<S> {
    inner: S,
    scope: String,
}

impl<S: KeyValueStore> ScopedStore<S> {
    pub fn new(inner: S, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}::{}", self.scope, key)
    }
}

impl<S: KeyValueStore> KeyValueStore for ScopedStore<S> {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(&self.scoped_key(key))
    }

    fn put(&self, key: &str, value: &str) {
        self.inner.put(&self.scoped_key(key), value);
    }

    fn remove(&self, key: &str) {
        self.inner.remove(&self.scoped_key(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("key"), None);

        store.put("key", "value");
        assert_eq!(store.get("key"), Some("value".to_string()));

        store.put("key", "other");
        assert_eq!(store.get("key"), Some("other".to_string()));

        store.remove("key");
        assert_eq!(store.get("key"), None);
    }

    #[test]
    fn test_memory_store_remove_missing_is_noop() {
        let store = MemoryStore::new();
        store.remove("missing");
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_shares_state_across_clones() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.put("key", "value");
        assert_eq!(clone.get("key"), Some("value".to_string()));
    }

    #[test]
    fn test_scoped_store_isolates_scopes() {
        let inner = MemoryStore::new();
        let a = ScopedStore::new(inner.clone(), "session-a");
        let b = ScopedStore::new(inner.clone(), "session-b");

        a.put("route", "/admin/users");
        assert_eq!(a.get("route"), Some("/admin/users".to_string()));
        assert_eq!(b.get("route"), None);

        b.put("route", "/candidate/profile");
        a.remove("route");
        assert_eq!(a.get("route"), None);
        assert_eq!(b.get("route"), Some("/candidate/profile".to_string()));
    }
}
