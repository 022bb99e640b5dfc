//! Bounded memoization for ordering ranks. The cache is a pure side-table: every entry is a function of its key, so it
//! never needs invalidation beyond evicting the least recently used entry when full, and results never depend on it.

use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};

use nalgebra::Vector3;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::CellOrdering;

/// Default number of ranks that a `SharedRankCache` created through `new_shared_rank_cache` holds
pub const DEFAULT_RANK_CACHE_CAPACITY: usize = 1 << 16;

#[derive(Clone, Debug)]
struct CacheEntry<V> {
    value: V,
    access_count: u64,
}

/// A bounded key-value store that evicts the least recently used entry when it is full. Recency is tracked with a
/// monotonic access counter
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: FxHashMap<K, CacheEntry<V>>,
    capacity: usize,
    access_counter: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Creates a new `LruCache` holding at most `capacity` entries
    ///
    /// # Panics
    ///
    /// If `capacity` is zero
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Cache capacity must be greater than 0");
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity.min(1024), FxBuildHasher),
            capacity,
            access_counter: 0,
        }
    }

    /// Returns the value for `key` and marks it as recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.access_counter += 1;
        let access_counter = self.access_counter;
        self.map.get_mut(key).map(|entry| {
            entry.access_count = access_counter;
            &entry.value
        })
    }

    /// Inserts `value` for `key`, evicting the least recently used entry if the cache is full. Returns the previous
    /// value for `key`, if any
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.access_counter += 1;
        if self.map.len() >= self.capacity && !self.map.contains_key(&key) {
            let lru_key = self
                .map
                .iter()
                .min_by_key(|(_, entry)| entry.access_count)
                .map(|(key, _)| key.clone());
            if let Some(lru_key) = lru_key {
                self.map.remove(&lru_key);
            }
        }
        let entry = CacheEntry {
            value,
            access_count: self.access_counter,
        };
        self.map.insert(key, entry).map(|previous| previous.value)
    }

    /// Does not count as an access
    pub fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.access_counter = 0;
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Memoization key of a single rank computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankKey {
    pub coord: [usize; 3],
    pub dims: [usize; 3],
    pub ordering: CellOrdering,
}

impl RankKey {
    pub fn new(coord: Vector3<usize>, dims: Vector3<usize>, ordering: CellOrdering) -> Self {
        Self {
            coord: coord.into(),
            dims: dims.into(),
            ordering,
        }
    }
}

/// Rank cache that can be handed to several `GridCoordinate`s and `ChunkedCoordinate`s, also across threads
pub type SharedRankCache = Arc<Mutex<LruCache<RankKey, u64>>>;

pub fn new_shared_rank_cache(capacity: usize) -> SharedRankCache {
    Arc::new(Mutex::new(LruCache::new(capacity)))
}

/// Runs `f` on the cache behind `cache`. A poisoned lock is recovered, since no entry can be left half-written in a way
/// that changes results
pub(crate) fn with_cache<R>(cache: &SharedRankCache, f: impl FnOnce(&mut LruCache<RankKey, u64>) -> R) -> R {
    let mut guard = cache.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut cache = LruCache::new(3);
        assert_eq!(None, cache.insert("a", 1));
        assert_eq!(Some(&1), cache.get(&"a"));
        assert_eq!(Some(1), cache.insert("a", 2));
        assert_eq!(Some(&2), cache.get(&"a"));
        assert_eq!(1, cache.len());
        assert_eq!(3, cache.capacity());
    }

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = LruCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.get(&"a");
        cache.get(&"b");
        cache.insert("d", 4);

        assert!(!cache.contains_key(&"c"));
        assert_eq!(Some(&1), cache.get(&"a"));
        assert_eq!(Some(&2), cache.get(&"b"));
        assert_eq!(Some(&4), cache.get(&"d"));
        assert_eq!(3, cache.len());
    }

    #[test]
    fn clear_empties_cache() {
        let mut cache = LruCache::new(2);
        cache.insert(1_u32, 1_u64);
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(None, cache.get(&1));
    }

    #[test]
    #[should_panic(expected = "Cache capacity must be greater than 0")]
    fn zero_capacity_panics() {
        let _cache = LruCache::<u32, u64>::new(0);
    }

    #[test]
    fn shared_cache_across_threads() {
        let cache = new_shared_rank_cache(16);
        let handles = (0..4_usize)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let key = RankKey::new(Vector3::new(i, 0, 0), Vector3::new(4, 1, 1), CellOrdering::RowMajor);
                    with_cache(&cache, |cache| cache.insert(key, i as u64));
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(4, with_cache(&cache, |cache| cache.len()));
    }
}
