//! In-memory TTL memoization for expensive remote computations.
//!
//! All pricing state is process-lifetime only; there is deliberately no disk
//! cache. Entries are written atomically under the mutex, so readers either
//! see a complete value or a miss. Two tasks racing on the same key may both
//! recompute; that costs one duplicate fetch and is tolerated.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::Mutex,
    time::{Duration, Instant},
};

/// Shared TTL for leveling and corruption results (5 minutes).
pub const RESULT_TTL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
struct Entry<V> {
    value: V,
    computed_at: Instant,
}

/// Time-bounded memoization keyed by item identity.
#[derive(Debug, Default)]
pub struct ResultCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value if it is younger than `ttl`.
    pub fn get_if_fresh(&self, key: &K, ttl: Duration) -> Option<V> {
        let entries = self.entries.lock().expect("cache mutex poisoned");
        entries
            .get(key)
            .filter(|entry| entry.computed_at.elapsed() < ttl)
            .map(|entry| entry.value.clone())
    }

    /// Stores a freshly computed value, overwriting any stale entry.
    pub fn store(&self, key: K, value: V) {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(
            key,
            Entry {
                value,
                computed_at: Instant::now(),
            },
        );
    }

    /// Returns the cached value while fresh, otherwise runs `compute`, stores
    /// the result and returns it. The compute step runs outside the lock.
    pub fn get_or_compute<F>(&self, key: K, ttl: Duration, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get_if_fresh(&key, ttl) {
            return hit;
        }
        let value = compute();
        self.store(key, value.clone());
        value
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache mutex poisoned").clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn second_read_within_ttl_skips_compute() {
        let cache: ResultCache<&str, u64> = ResultCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            42
        };

        let first = cache.get_or_compute("spell-echo", RESULT_TTL, compute);
        let second = cache.get_or_compute("spell-echo", RESULT_TTL, || {
            calls.set(calls.get() + 1);
            99
        });

        assert_eq!(first, 42);
        assert_eq!(second, 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expired_entry_is_recomputed() {
        let cache: ResultCache<&str, u64> = ResultCache::new();
        cache.store("multistrike", 7);
        std::thread::sleep(Duration::from_millis(15));

        assert_eq!(cache.get_if_fresh(&"multistrike", Duration::from_millis(5)), None);
        let value = cache.get_or_compute("multistrike", Duration::from_millis(5), || 8);
        assert_eq!(value, 8);
    }

    #[test]
    fn distinct_keys_do_not_collide() {
        let cache: ResultCache<(String, u8), f64> = ResultCache::new();
        cache.store(("gem".to_string(), 1), 1.5);
        cache.store(("gem".to_string(), 5), 150.0);

        assert_eq!(cache.get_if_fresh(&("gem".to_string(), 1), RESULT_TTL), Some(1.5));
        assert_eq!(cache.get_if_fresh(&("gem".to_string(), 5), RESULT_TTL), Some(150.0));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache: ResultCache<&str, u64> = ResultCache::new();
        cache.store("a", 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
