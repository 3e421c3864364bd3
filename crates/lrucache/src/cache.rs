//! LruCache: key index + recency list under one capacity

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::index::KeyIndex;
use crate::list::{Iter, RecencyList};

/// Fixed-capacity cache that evicts the least recently used entry when full
///
/// `get` and `set` are O(1). Both refresh the touched key's recency, so both
/// take `&mut self`.
///
/// # Examples
/// ```
/// use lrucache::LruCache;
///
/// let mut cache = LruCache::new(2).unwrap();
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.get(&"a");
/// cache.set("c", 3); // evicts "b"
///
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(&1));
/// ```
pub struct LruCache<K, V> {
    /// Entries in recency order, owns keys and values
    list: RecencyList<K, V>,

    /// Key -> list handle
    index: KeyIndex<K>,

    /// Maximum number of entries
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!("LRU cache created with capacity {}", capacity);
        Ok(Self {
            list: RecencyList::with_capacity(capacity),
            index: KeyIndex::with_capacity(capacity),
            capacity,
        })
    }

    /// Get a value and mark it most recently used
    ///
    /// Returns `None` on a miss; a miss never mutates the cache.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.lookup(key)?;
        self.list.move_to_front(handle);
        Some(self.list.value(handle))
    }

    /// Mutable variant of [`get`](Self::get), also refreshes recency
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.lookup(key)?;
        self.list.move_to_front(handle);
        Some(self.list.value_mut(handle))
    }

    /// Read a value without touching recency order
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).map(|handle| self.list.value(handle))
    }

    /// Check for a key without touching recency order
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.lookup(key).is_some()
    }

    /// Insert or update a key, marking it most recently used
    ///
    /// Inserting a new key into a full cache first evicts the least recently
    /// used entry, so the size never exceeds capacity.
    pub fn set(&mut self, key: K, value: V) {
        if let Some(handle) = self.index.lookup(&key) {
            *self.list.value_mut(handle) = value;
            self.list.move_to_front(handle);
            return;
        }

        if self.list.len() == self.capacity {
            self.evict();
        }

        let handle = self.list.insert_front(key.clone(), value);
        self.index.insert(key, handle);
    }

    /// Remove a key, returning its value if it was cached
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.index.remove(key)?;
        let (_, value) = self.list.remove(handle);
        trace!("Removed entry, {} remaining", self.list.len());
        Some(value)
    }

    /// Key that the next eviction would drop
    pub fn lru_key(&self) -> Option<&K> {
        self.list.back_key()
    }

    /// Key touched most recently
    pub fn mru_key(&self) -> Option<&K> {
        self.list.front_key()
    }

    /// Keys from most to least recently used
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.list.iter().map(|(key, _)| key)
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.list.iter()
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry; capacity is unchanged
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        trace!("Cache cleared");
    }

    // List and index change together here; nothing else drops entries on overflow.
    fn evict(&mut self) {
        if let Some((key, _)) = self.list.remove_back() {
            self.index.remove(&key);
            trace!(
                "Evicted least recently used entry, {} remaining",
                self.list.len()
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        self.list.debug_validate_invariants();
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.list.len() <= self.capacity);
        assert!(self.list.slot_count() <= self.capacity);
        for (key, handle) in self.index.iter() {
            assert!(self.list.key(handle) == key);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, K, V>(&'a LruCache<K, V>);

impl<K, V> fmt::Debug for DebugEntries<'_, K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}
