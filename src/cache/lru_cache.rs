//! LRU Cache Module
//!
//! Thread-safe cache front for [`BoundedStore`], adding the disabled mode, the
//! per-entry size limit, statistics and a terminal close.
//!
//! Every operation takes the same exclusive lock. A lookup hit reorders the
//! recency list, so there is no shared-read path.

use std::fmt::Debug;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{BoundedStore, CacheStats, EntrySize};

#[derive(Debug)]
struct CacheState<K, V> {
    store: BoundedStore<K, V>,
    stats: CacheStats,
}

// == LRU Cache ==
/// Bounded, thread-safe LRU cache.
///
/// A capacity of zero disables the cache: lookups always miss and writes are
/// dropped without touching the lock. After [`LruCache::close`] the cache
/// behaves the same way for the rest of its life.
#[derive(Debug)]
pub struct LruCache<K, V> {
    /// None once the cache has been closed
    state: Mutex<Option<CacheState<K, V>>>,
    /// Maximum number of entries retained
    capacity: usize,
    /// Largest [`EntrySize`] accepted by `put`
    max_entry_size: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone + EntrySize,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, each no larger than
    /// `max_entry_size`.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; 0 disables caching
    /// * `max_entry_size` - Values whose size exceeds this are never cached
    pub fn new(capacity: usize, max_entry_size: usize) -> Self {
        let state = (capacity > 0).then(|| CacheState {
            store: BoundedStore::new(capacity),
            stats: CacheStats::new(),
        });

        Self {
            state: Mutex::new(state),
            capacity,
            max_entry_size,
        }
    }

    /// Returns false when the cache was built with zero capacity.
    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Maximum number of resident entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest entry size `put` accepts.
    pub fn max_entry_size(&self) -> usize {
        self.max_entry_size
    }

    // == Get ==
    /// Returns a copy of the cached value and marks it most recently used.
    ///
    /// None means "fetch it yourself": the key is absent, the cache is
    /// disabled, or it has been closed.
    pub fn get(&self, key: &K) -> Option<V> {
        if !self.is_enabled() {
            return None;
        }

        let mut guard = self.state.lock();
        let state = guard.as_mut()?;

        match state.store.get(key) {
            Some(value) => {
                let value = value.clone();
                state.stats.record_hit();
                debug!(key = ?key, "cache hit");
                Some(value)
            }
            None => {
                state.stats.record_miss();
                debug!(key = ?key, "cache miss");
                None
            }
        }
    }

    // == Put ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// Oversized values are dropped silently, as are all writes to a disabled
    /// or closed cache. If the cache is full, the least recently used entry is
    /// evicted to make room.
    pub fn put(&self, key: K, value: V) {
        self.put_if(key, value, || true);
    }

    /// Like [`LruCache::put`], but stores the value only if `still_valid`
    /// returns true.
    ///
    /// The check runs under the cache lock, so a `delete` that completes
    /// before it cannot be overtaken by this write.
    pub fn put_if<F>(&self, key: K, value: V, still_valid: F)
    where
        F: FnOnce() -> bool,
    {
        if !self.is_enabled() {
            return;
        }

        let size = value.entry_size();
        let mut guard = self.state.lock();
        let Some(state) = guard.as_mut() else {
            return;
        };

        if !still_valid() {
            debug!(key = ?key, "cache entry skipped: invalidated while loading");
            return;
        }

        if size > self.max_entry_size {
            state.stats.record_rejection();
            debug!(
                key = ?key,
                size,
                max = self.max_entry_size,
                "cache entry rejected: size limit exceeded"
            );
            return;
        }

        if let Some(evicted) = state.store.put(key.clone(), value) {
            state.stats.record_eviction();
            debug!(key = ?evicted.key, "cache capacity reached, evicted least recently used");
        }
        state.stats.set_total_entries(state.store.len());
        debug!(key = ?key, "cache entry stored");
    }

    // == Delete ==
    /// Removes the entry for `key`. Missing keys are ignored.
    pub fn delete(&self, key: &K) {
        if !self.is_enabled() {
            return;
        }

        let mut guard = self.state.lock();
        let Some(state) = guard.as_mut() else {
            return;
        };

        if state.store.remove(key).is_some() {
            state.stats.set_total_entries(state.store.len());
            debug!(key = ?key, "cache entry deleted");
        }
    }

    // == Close ==
    /// Releases every entry. The cache stays usable only as a permanent miss.
    pub fn close(&self) {
        let released = self.state.lock().take();

        if let Some(mut state) = released {
            let count = state.store.len();
            state.store.clear();
            info!(released = count, "cache resources released");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.is_enabled() && self.state.lock().is_none()
    }

    // == Stats ==
    /// Returns a snapshot of the counters; zeros when disabled or closed.
    pub fn stats(&self) -> CacheStats {
        self.state
            .lock()
            .as_ref()
            .map(|state| {
                let mut stats = state.stats.clone();
                stats.set_total_entries(state.store.len());
                stats
            })
            .unwrap_or_default()
    }

    // == Length ==
    /// Returns the number of resident entries.
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .as_ref()
            .map_or(0, |state| state.store.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys ordered from most to least recently used, without promoting any.
    pub fn keys(&self) -> Vec<K> {
        self.state
            .lock()
            .as_ref()
            .map(|state| state.store.keys())
            .unwrap_or_default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(len: usize) -> Vec<u32> {
        (0..len as u32).collect()
    }

    #[test]
    fn test_get_disabled() {
        let cache: LruCache<i64, Vec<u32>> = LruCache::new(0, 10);
        assert!(!cache.is_enabled());
        assert_eq!(cache.get(&1), None);
    }

    #[test]
    fn test_get_miss() {
        let cache: LruCache<i64, Vec<u32>> = LruCache::new(2, 10);
        assert_eq!(cache.get(&42), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_put_and_get() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));

        assert_eq!(cache.get(&1), Some(entry(1)));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_put_disabled() {
        let cache = LruCache::new(0, 10);

        cache.put(1, entry(1));
        cache.delete(&1);

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_put_size_limit_exceeded() {
        let cache = LruCache::new(2, 1);

        cache.put(1, entry(2));

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.stats().rejections, 1);
    }

    #[test]
    fn test_put_at_size_limit_is_cached() {
        let cache = LruCache::new(2, 3);

        cache.put(1, entry(3));

        assert_eq!(cache.get(&1), Some(entry(3)));
    }

    #[test]
    fn test_oversized_put_keeps_previous_value() {
        let cache = LruCache::new(2, 2);

        cache.put(1, entry(1));
        cache.put(1, entry(5));

        assert_eq!(cache.get(&1), Some(entry(1)));
    }

    #[test]
    fn test_put_overwrite() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.put(1, entry(2));

        assert_eq!(cache.get(&1).map(|v| v.len()), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_lru_eviction_after_promotion() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.put(2, entry(1));
        assert!(cache.get(&1).is_some());
        cache.put(3, entry(1));

        assert_eq!(cache.get(&2), None);
        assert!(cache.get(&1).is_some());
        assert!(cache.get(&3).is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_put_if_skips_when_invalidated() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.put_if(1, entry(3), || false);
        cache.put_if(2, entry(1), || false);

        assert_eq!(cache.get(&1), Some(entry(1)));
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_if_stores_when_valid() {
        let cache = LruCache::new(2, 10);

        cache.put_if(1, entry(2), || true);

        assert_eq!(cache.get(&1), Some(entry(2)));
    }

    #[test]
    fn test_accessors_report_construction_limits() {
        let cache: LruCache<i64, Vec<u32>> = LruCache::new(7, 3);
        assert_eq!(cache.capacity(), 7);
        assert_eq!(cache.max_entry_size(), 3);
    }

    #[test]
    fn test_returned_value_is_a_copy() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(2));
        let mut copy = cache.get(&1).unwrap();
        copy.clear();

        assert_eq!(cache.get(&1), Some(entry(2)));
    }

    #[test]
    fn test_delete() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.delete(&1);

        assert_eq!(cache.get(&1), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.delete(&42);

        assert_eq!(cache.len(), 1);
        assert!(cache.get(&1).is_some());
    }

    #[test]
    fn test_close_releases_entries() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.put(2, entry(1));
        cache.close();

        assert!(cache.is_closed());
        assert_eq!(cache.len(), 0);
        assert!(cache.keys().is_empty());
    }

    #[test]
    fn test_operations_after_close_degrade_to_misses() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.close();
        cache.put(2, entry(1));
        cache.delete(&1);

        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.stats(), CacheStats::default());

        // Closing twice is harmless
        cache.close();
        assert!(cache.is_closed());
    }

    #[test]
    fn test_keys_does_not_promote() {
        let cache = LruCache::new(2, 10);

        cache.put(1, entry(1));
        cache.put(2, entry(1));
        assert_eq!(cache.keys(), vec![2, 1]);

        cache.put(3, entry(1));
        assert_eq!(cache.keys(), vec![3, 2]);
    }
}
