//! Bounded Store Module
//!
//! Single-threaded LRU engine combining a HashMap index with the recency list.

use std::collections::HashMap;
use std::hash::Hash;

use crate::cache::{Handle, Record, RecencyList};

// == Bounded Store ==
/// LRU store holding at most `capacity` records.
///
/// Every key in `index` has exactly one node in `order` and vice versa, so
/// `index.len() == order.len() <= capacity` holds between calls.
#[derive(Debug)]
pub struct BoundedStore<K, V> {
    /// Key to recency-list handle
    index: HashMap<K, Handle>,
    /// Records from most to least recently used
    order: RecencyList<Record<K, V>>,
    /// Maximum number of records retained
    capacity: usize,
}

impl<K, V> BoundedStore<K, V>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store that retains at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            order: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    // == Get ==
    /// Looks up `key` and promotes it to most recently used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let handle = *self.index.get(key)?;
        self.order.move_to_front(handle);
        self.order.get(handle).map(|record| &record.value)
    }

    // == Put ==
    /// Inserts or replaces the record for `key` at the front.
    ///
    /// Replacing an existing key does not count against capacity. When a new
    /// key would overflow a full store, the least recently used record is
    /// evicted first and returned.
    pub fn put(&mut self, key: K, value: V) -> Option<Record<K, V>> {
        if self.capacity == 0 {
            return None;
        }

        if let Some(handle) = self.index.remove(&key) {
            self.order.remove(handle);
        }

        let evicted = if self.order.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };

        let handle = self.order.push_front(Record::new(key.clone(), value));
        self.index.insert(key, handle);

        evicted
    }

    // == Remove ==
    /// Removes `key` and returns its value, if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let handle = self.index.remove(key)?;
        self.order.remove(handle).map(|record| record.value)
    }

    // == Evict Oldest ==
    fn evict_oldest(&mut self) -> Option<Record<K, V>> {
        let record = self.order.pop_back()?;
        self.index.remove(&record.key);
        Some(record)
    }

    // == Contains ==
    /// Checks membership without touching recency.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the next eviction candidate without touching recency.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.back().map(|record| &record.key)
    }

    /// Keys ordered from most to least recently used.
    pub fn keys(&self) -> Vec<K> {
        self.order.iter().map(|record| record.key.clone()).collect()
    }

    // == Clear ==
    /// Drops every record.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    // == Length ==
    /// Returns the current number of records.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.index.len(), self.order.len());
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store: BoundedStore<u32, String> = BoundedStore::new(10);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 10);
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = BoundedStore::new(10);

        store.put(1, "one".to_string());

        assert_eq!(store.get(&1), Some(&"one".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: BoundedStore<u32, String> = BoundedStore::new(10);
        assert_eq!(store.get(&42), None);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = BoundedStore::new(2);

        store.put(1, "v1");
        let evicted = store.put(1, "v2");

        assert!(evicted.is_none());
        assert_eq!(store.get(&1), Some(&"v2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite_at_capacity_does_not_evict() {
        let mut store = BoundedStore::new(2);

        store.put(1, "a");
        store.put(2, "b");
        let evicted = store.put(1, "a2");

        assert!(evicted.is_none());
        assert_eq!(store.len(), 2);
        assert!(store.contains(&2));
        // Re-insertion lands at the front, so 2 is now the oldest
        assert_eq!(store.peek_oldest(), Some(&2));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = BoundedStore::new(3);

        store.put("key1", 1);
        store.put("key2", 2);
        store.put("key3", 3);

        let evicted = store.put("key4", 4);

        assert_eq!(evicted, Some(Record::new("key1", 1)));
        assert_eq!(store.len(), 3);
        assert_eq!(store.get(&"key1"), None);
        assert!(store.get(&"key2").is_some());
        assert!(store.get(&"key3").is_some());
        assert!(store.get(&"key4").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = BoundedStore::new(3);

        store.put("key1", 1);
        store.put("key2", 2);
        store.put("key3", 3);

        // Access key1 to make it most recently used
        store.get(&"key1");

        let evicted = store.put("key4", 4);

        assert_eq!(evicted.map(|r| r.key), Some("key2"));
        assert!(store.contains(&"key1"));
        assert!(!store.contains(&"key2"));
    }

    #[test]
    fn test_store_remove() {
        let mut store = BoundedStore::new(3);

        store.put(1, "a");
        store.put(2, "b");

        assert_eq!(store.remove(&1), Some("a"));
        assert_eq!(store.remove(&1), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys(), vec![2]);
    }

    #[test]
    fn test_store_keys_in_recency_order() {
        let mut store = BoundedStore::new(4);

        store.put('a', ());
        store.put('b', ());
        store.put('c', ());
        store.get(&'a');

        assert_eq!(store.keys(), vec!['a', 'c', 'b']);
    }

    #[test]
    fn test_store_zero_capacity_holds_nothing() {
        let mut store = BoundedStore::new(0);

        assert!(store.put(1, "a").is_none());
        assert!(store.is_empty());
        assert_eq!(store.get(&1), None);
    }

    #[test]
    fn test_store_capacity_one() {
        let mut store = BoundedStore::new(1);

        store.put(1, "a");
        let evicted = store.put(2, "b");

        assert_eq!(evicted.map(|r| r.key), Some(1));
        assert_eq!(store.keys(), vec![2]);
    }

    #[test]
    fn test_store_clear() {
        let mut store = BoundedStore::new(3);

        store.put(1, "a");
        store.put(2, "b");
        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.get(&1), None);
        assert_eq!(store.peek_oldest(), None);
    }
}
