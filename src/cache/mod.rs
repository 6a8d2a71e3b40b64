//! Cache Module
//!
//! Bounded in-process LRU cache sitting between the chat service and storage.
//!
//! - [`RecencyList`]: intrusive MRU/LRU list over a generation-checked arena
//! - [`BoundedStore`]: index plus recency list, single-threaded
//! - [`LruCache`]: locked, size-limited front used by the service

mod entry;
mod lru_cache;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use entry::{EntrySize, Record};
pub use lru_cache::LruCache;
pub use recency::{Handle, RecencyList};
pub use stats::CacheStats;
pub use store::BoundedStore;
