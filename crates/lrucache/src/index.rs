//! Key index: key -> recency list handle

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::list::Handle;

/// Hash map from key to the handle of the entry holding it
pub(crate) struct KeyIndex<K> {
    map: HashMap<K, Handle, RandomState>,
}

impl<K: Hash + Eq> KeyIndex<K> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub(crate) fn lookup<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Register a mapping; the key must not already be present
    pub(crate) fn insert(&mut self, key: K, handle: Handle) {
        let previous = self.map.insert(key, handle);
        debug_assert!(previous.is_none(), "key index already held this key");
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, Handle)> {
        self.map.iter().map(|(k, h)| (k, *h))
    }
}
