//! # Query Cache
//!
//! Per-input-key memoization with generation-tagged invalidation.
//!
//! Keys encode the full input tuple of a step, so any input change lands on
//! a different key. Generations handle the other half of the reactive
//! contract: `invalidate_all` bumps the generation, which both hides every
//! existing entry and causes results of in-flight computations started
//! under the old generation to be discarded on completion (results are
//! ignored, the underlying work is not aborted).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::debug;

struct Entry<V> {
    generation: u64,
    value: V,
}

/// A keyed cache whose entries die wholesale on invalidation.
pub struct QueryCache<V> {
    /// Current generation; entries from older generations are invisible.
    generation: AtomicU64,
    /// Cached values by input key.
    entries: RwLock<HashMap<String, Entry<V>>>,
}

impl<V: Clone> QueryCache<V> {
    /// Creates an empty cache at generation zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The current generation. Capture this before starting a computation
    /// and pass it to [`insert`](Self::insert) when the result arrives.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the cached value for `key`, if one exists in the current
    /// generation.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let current = self.generation();
        let entries = self.entries.read().ok()?;
        entries
            .get(key)
            .filter(|entry| entry.generation == current)
            .map(|entry| entry.value.clone())
    }

    /// Stores a computed value, unless the cache moved on while the
    /// computation was in flight.
    ///
    /// Returns false (and stores nothing) when `started_at` is no longer
    /// the current generation: the result is stale and must not be
    /// surfaced.
    pub fn insert(&self, key: impl Into<String>, started_at: u64, value: V) -> bool {
        let key = key.into();
        if started_at != self.generation() {
            debug!(key = %key, started_at, "Discarding stale query result");
            return false;
        }

        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        // Re-check under the lock: an invalidation may have raced in.
        let current = self.generation();
        if started_at != current {
            debug!(key = %key, started_at, current, "Discarding stale query result");
            return false;
        }

        entries.insert(
            key,
            Entry {
                generation: current,
                value,
            },
        );
        true
    }

    /// Drops every entry by bumping the generation.
    pub fn invalidate_all(&self) {
        let next = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
        debug!(generation = next, "Query cache invalidated");
    }

    /// Number of stored entries (live or hidden).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let cache: QueryCache<u32> = QueryCache::new();
        let gen = cache.generation();

        assert!(cache.insert("k", gen, 7));
        assert_eq!(cache.get("k"), Some(7));
    }

    #[test]
    fn test_distinct_keys_are_independent() {
        let cache: QueryCache<u32> = QueryCache::new();
        let gen = cache.generation();

        cache.insert("module-a", gen, 1);
        cache.insert("module-b", gen, 2);
        assert_eq!(cache.get("module-a"), Some(1));
        assert_eq!(cache.get("module-b"), Some(2));
    }

    #[test]
    fn test_invalidation_hides_entries() {
        let cache: QueryCache<u32> = QueryCache::new();
        let gen = cache.generation();
        cache.insert("k", gen, 7);

        cache.invalidate_all();
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_stale_inflight_result_is_discarded() {
        let cache: QueryCache<u32> = QueryCache::new();

        // A computation starts, then its inputs change before it finishes.
        let started_at = cache.generation();
        cache.invalidate_all();

        assert!(!cache.insert("k", started_at, 7));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_fresh_insert_after_invalidation() {
        let cache: QueryCache<u32> = QueryCache::new();
        cache.invalidate_all();

        let gen = cache.generation();
        assert!(cache.insert("k", gen, 9));
        assert_eq!(cache.get("k"), Some(9));
    }
}
