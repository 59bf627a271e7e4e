//! LRU (Least Recently Used) cache implementation
//!
//! Entries live in a slot vector; recency is an intrusive doubly-linked list
//! threaded through slot indices, most recently used at the head.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

/// Entry in the recency list
struct Entry<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    index: HashMap<K, usize, RandomState>,
    slots: Vec<Option<Entry<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_slots: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Panics
    /// If `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            index: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_slots: Vec::new(),
            capacity,
        }
    }

    /// Get a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.promote(slot);
        self.entry(slot).map(|entry| &entry.value)
    }

    /// Get a value without touching its recency
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.entry(slot).map(|entry| &entry.value)
    }

    /// Check whether a key is cached, without touching its recency
    pub fn contains_key(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Insert or overwrite a key, making it most recently used
    ///
    /// # Returns
    /// * `Some((key, value))` - The least recently used entry, evicted to make room
    /// * `None` - Nothing was evicted
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.slots[slot].as_mut() {
                entry.value = value;
            }
            self.promote(slot);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.pop_lru()
        } else {
            None
        };

        let slot = self.alloc_slot();
        self.slots[slot] = Some(Entry {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_front(slot);
        self.index.insert(key, slot);

        evicted
    }

    /// Remove a key from the cache
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.release(slot).map(|entry| entry.value)
    }

    /// Remove every entry for which `keep` returns `false`
    ///
    /// # Returns
    /// * Number of removed entries
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<usize> = self
            .index
            .values()
            .copied()
            .filter(|&slot| {
                self.entry(slot)
                    .map(|entry| !keep(&entry.key, &entry.value))
                    .unwrap_or(false)
            })
            .collect();

        for &slot in &doomed {
            if let Some(entry) = self.release(slot) {
                self.index.remove(&entry.key);
            }
        }

        doomed.len()
    }

    /// Pop the least recently used entry
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let slot = self.tail?;
        let entry = self.release(slot)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }

    /// Iterate from least to most recently used
    pub fn iter_lru(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        std::iter::successors(self.tail, move |&slot| self.entry(slot).and_then(|e| e.prev))
            .filter_map(move |slot| self.entry(slot).map(|e| (&e.key, &e.value)))
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Maximum number of entries held at once
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.free_slots.clear();
        self.head = None;
        self.tail = None;
    }

    fn entry(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    fn promote(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(entry) = self.slots[slot].as_mut() {
            entry.prev = None;
            entry.next = old_head;
        }

        match old_head {
            Some(head) => {
                if let Some(entry) = self.slots[head].as_mut() {
                    entry.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    fn unlink(&mut self, slot: usize) {
        let Some((prev, next)) = self.entry(slot).map(|e| (e.prev, e.next)) else {
            return;
        };

        match prev {
            Some(prev) => {
                if let Some(entry) = self.slots[prev].as_mut() {
                    entry.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next) => {
                if let Some(entry) = self.slots[next].as_mut() {
                    entry.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Unlink a slot and hand its entry back; the index is left to the caller
    fn release(&mut self, slot: usize) -> Option<Entry<K, V>> {
        self.unlink(slot);
        let entry = self.slots.get_mut(slot)?.take()?;
        self.free_slots.push(slot);
        Some(entry)
    }

    fn alloc_slot(&mut self) -> usize {
        self.free_slots.pop().unwrap_or_else(|| {
            self.slots.push(None);
            self.slots.len() - 1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lru_keys(cache: &LruCache<i32, &'static str>) -> Vec<i32> {
        cache.iter_lru().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_lru_basic() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.get(&1), Some(&"a"));
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(3, "c"), Some((1, "a")));

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), Some(&"b"));
        assert_eq!(cache.get(&3), Some(&"c"));
    }

    #[test]
    fn test_lru_get_promotes() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.get(&1);
        assert_eq!(cache.put(3, "c"), Some((2, "b")));

        assert_eq!(lru_keys(&cache), vec![1, 3]);
    }

    #[test]
    fn test_lru_peek_does_not_promote() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.peek(&1), Some(&"a"));
        cache.put(3, "c");

        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&2));
    }

    #[test]
    fn test_lru_overwrite() {
        let mut cache = LruCache::new(2);

        cache.put(1, "a");
        cache.put(2, "b");
        assert_eq!(cache.put(1, "z"), None);

        assert_eq!(cache.len(), 2);
        assert_eq!(lru_keys(&cache), vec![2, 1]);
        assert_eq!(cache.peek(&1), Some(&"z"));
    }

    #[test]
    fn test_lru_remove() {
        let mut cache = LruCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.put(3, "c");

        assert_eq!(cache.remove(&2), Some("b"));
        assert_eq!(cache.remove(&2), None);
        assert_eq!(cache.len(), 2);
        assert_eq!(lru_keys(&cache), vec![1, 3]);
    }

    #[test]
    fn test_lru_retain() {
        let mut cache = LruCache::new(5);
        for key in 1..=5 {
            cache.put(key, "v");
        }

        let removed = cache.retain(|k, _| k % 2 == 0);

        assert_eq!(removed, 3);
        assert_eq!(lru_keys(&cache), vec![2, 4]);

        // Freed slots are reused without growing past capacity
        for key in 10..13 {
            cache.put(key, "w");
        }
        assert_eq!(cache.len(), 5);
        assert_eq!(lru_keys(&cache), vec![2, 4, 10, 11, 12]);
    }

    #[test]
    fn test_lru_pop_lru() {
        let mut cache = LruCache::new(3);
        cache.put(1, "a");
        cache.put(2, "b");

        assert_eq!(cache.pop_lru(), Some((1, "a")));
        assert_eq!(cache.pop_lru(), Some((2, "b")));
        assert_eq!(cache.pop_lru(), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_lru_clear() {
        let mut cache = LruCache::new(3);

        cache.put(1, "a");
        cache.put(2, "b");
        cache.clear();

        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.iter_lru().count(), 0);
    }

    #[test]
    #[should_panic(expected = "Capacity must be greater than 0")]
    fn test_lru_zero_capacity() {
        let _cache: LruCache<i32, i32> = LruCache::new(0);
    }
}
