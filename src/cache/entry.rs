//! Cache Entry Module
//!
//! Defines the record stored in the recency list and the size measure used to
//! reject oversized values.

// == Entry Size ==
/// Size of a value as seen by the cache's per-entry limit.
///
/// The unit is up to the value type; chats report their message count.
pub trait EntrySize {
    fn entry_size(&self) -> usize;
}

impl<T> EntrySize for Vec<T> {
    fn entry_size(&self) -> usize {
        self.len()
    }
}

// == Record ==
/// A cached key/value pair, owned by the store.
///
/// The key is kept alongside the value so that evicting from the back of the
/// recency list can also drop the matching index entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Record<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}
