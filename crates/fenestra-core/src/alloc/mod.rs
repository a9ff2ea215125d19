//! Optimized allocation and collection types for Fenestra.
//!
//! Re-exports hash collections backed by AHash, which hashes small keys
//! (node ids, content-type strings) considerably faster than SipHash.

// Re-export optimized hash collections
pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Type alias for the standard HashMap with AHash for better performance.
pub type AHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for the standard HashSet with AHash for better performance.
pub type AHashSet<T> = ahash::AHashSet<T>;
