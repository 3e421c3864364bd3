//! SharedLruCache: LruCache behind one exclusive lock
//!
//! A cache hit reorders the recency list, so reads need the same exclusive
//! access as writes. A `RwLock` would buy nothing here.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::Arc;
use parking_lot::Mutex;

use crate::cache::LruCache;
use crate::error::Result;

/// Cloneable, thread-safe handle to a single [`LruCache`]
pub struct SharedLruCache<K, V> {
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new shared cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidCapacity` - if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(LruCache::new(capacity)?)),
        })
    }

    /// Get a copy of a value, refreshing its recency
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Insert or update a key
    pub fn set(&self, key: K, value: V) {
        self.inner.lock().set(key, value);
    }

    /// Remove a key, returning its value if it was cached
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    /// Check for a key without touching recency order
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Run several operations under a single lock acquisition
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut LruCache<K, V>) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
