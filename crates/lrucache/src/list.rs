//! Recency list: arena-backed doubly linked list
//!
//! Entries live in a slot arena and link to each other by [`Handle`] instead
//! of by pointer. Vacated slots go on a free list and are reused by the next
//! insert, so the arena never holds more slots than the peak live count.
//!
//! ```text
//!   front (MRU)                                  back (LRU)
//!      │                                             │
//!      ▼                                             ▼
//!   [slot 2] ◄──► [slot 0] ◄──► [slot 3] ◄──► [slot 1]
//! ```

use std::fmt;

/// Stable reference to an entry slot in the recency list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle(usize);

impl Handle {
    #[cfg(test)]
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// One cached key/value pair and its position in recency order
struct Entry<K, V> {
    key: K,
    value: V,
    /// Neighbour closer to the front (more recently used)
    prev: Option<Handle>,
    /// Neighbour closer to the back (less recently used)
    next: Option<Handle>,
}

/// Doubly linked list ordered from most to least recently used
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free_list: Vec<usize>,
    front: Option<Handle>,
    back: Option<Handle>,
    len: usize,
}

#[cold]
#[track_caller]
fn stale(handle: Handle) -> ! {
    panic!("recency list invariant violated: stale handle {:?}", handle)
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list with room for `capacity` entries
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            front: None,
            back: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Link a new entry as the most recently used one
    pub(crate) fn insert_front(&mut self, key: K, value: V) -> Handle {
        let entry = Entry {
            key,
            value,
            prev: None,
            next: None,
        };

        let handle = match self.free_list.pop() {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                Handle(idx)
            }
            None => {
                self.slots.push(Some(entry));
                Handle(self.slots.len() - 1)
            }
        };
        self.len += 1;

        self.link_front(handle);
        handle
    }

    /// Reposition a linked entry at the front
    ///
    /// # Panics
    /// If `handle` does not refer to a live entry.
    pub(crate) fn move_to_front(&mut self, handle: Handle) {
        // Identity check: the front handle is the entry itself, not an equal key
        if self.front == Some(handle) {
            return;
        }

        self.unlink(handle);
        self.link_front(handle);
    }

    /// Remove and return the least recently used entry
    ///
    /// Returns `None` if the list is empty.
    pub(crate) fn remove_back(&mut self) -> Option<(K, V)> {
        let back = self.back?;
        Some(self.remove(back))
    }

    /// Unlink an arbitrary entry and free its slot
    ///
    /// # Panics
    /// If `handle` does not refer to a live entry.
    pub(crate) fn remove(&mut self, handle: Handle) -> (K, V) {
        self.unlink(handle);
        let entry = self.release(handle);
        (entry.key, entry.value)
    }

    /// Key of the most recently used entry
    pub(crate) fn front_key(&self) -> Option<&K> {
        self.front.map(|handle| &self.entry(handle).key)
    }

    /// Key of the least recently used entry (next eviction victim)
    pub(crate) fn back_key(&self) -> Option<&K> {
        self.back.map(|handle| &self.entry(handle).key)
    }

    pub(crate) fn value(&self, handle: Handle) -> &V {
        &self.entry(handle).value
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.entry_mut(handle).value
    }

    /// Iterate from most to least recently used
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.front,
            remaining: self.len,
        }
    }

    /// Drop every entry and release the slot storage
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.front = None;
        self.back = None;
        self.len = 0;
    }

    fn entry(&self, handle: Handle) -> &Entry<K, V> {
        match self.slots.get(handle.0) {
            Some(Some(entry)) => entry,
            _ => stale(handle),
        }
    }

    fn entry_mut(&mut self, handle: Handle) -> &mut Entry<K, V> {
        match self.slots.get_mut(handle.0) {
            Some(Some(entry)) => entry,
            _ => stale(handle),
        }
    }

    fn link_front(&mut self, handle: Handle) {
        let old_front = self.front;
        {
            let entry = self.entry_mut(handle);
            entry.prev = None;
            entry.next = old_front;
        }

        match old_front {
            Some(front) => self.entry_mut(front).prev = Some(handle),
            None => self.back = Some(handle),
        }
        self.front = Some(handle);
    }

    fn unlink(&mut self, handle: Handle) {
        let (prev, next) = {
            let entry = self.entry(handle);
            (entry.prev, entry.next)
        };

        match prev {
            Some(prev) => self.entry_mut(prev).next = next,
            None => self.front = next,
        }

        match next {
            Some(next) => self.entry_mut(next).prev = prev,
            None => self.back = prev,
        }

        let entry = self.entry_mut(handle);
        entry.prev = None;
        entry.next = None;
    }

    fn release(&mut self, handle: Handle) -> Entry<K, V> {
        let entry = match self.slots.get_mut(handle.0).and_then(Option::take) {
            Some(entry) => entry,
            None => stale(handle),
        };
        self.free_list.push(handle.0);
        self.len -= 1;
        entry
    }

    /// Number of allocated slots, live or free
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.entry(handle).key
    }

    #[cfg(test)]
    pub(crate) fn debug_validate_invariants(&self) {
        if self.front.is_none() || self.back.is_none() {
            assert!(self.front.is_none());
            assert!(self.back.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.front;
        let mut prev = None;

        while let Some(handle) = current {
            assert!(seen.insert(handle), "cycle at {:?}", handle);
            let entry = self.entry(handle);
            assert_eq!(entry.prev, prev);
            if entry.next.is_none() {
                assert_eq!(self.back, Some(handle));
            }

            prev = Some(handle);
            current = entry.next;
            count += 1;
            assert!(count <= self.len);
        }

        assert_eq!(count, self.len);
        assert_eq!(self.slots.len(), self.len + self.free_list.len());
    }
}

/// Iterator over cache entries from most to least recently used
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.cursor?;
        let entry = self.list.entry(handle);
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}
