//! Range-sum queries over a caller-owned array, with and without an LRU cache

use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Inclusive index range `(L, R)` with `L <= R`
pub type RangeKey = (usize, usize);

/// Sum `array[left..=right]` directly
///
/// # Panics
/// If `right` is out of bounds.
pub fn range_sum_no_cache(array: &[i64], left: usize, right: usize) -> i64 {
    array[left..=right].iter().sum()
}

/// Write `value` into `array[index]`
pub fn update_no_cache(array: &mut [i64], index: usize, value: i64) {
    array[index] = value;
}

/// A way of answering range-sum queries and applying point updates
pub trait RangeStrategy {
    /// Sum of `array[left..=right]`
    fn range_sum(&mut self, array: &[i64], left: usize, right: usize) -> i64;

    /// Store `value` at `array[index]`
    fn update(&mut self, array: &mut [i64], index: usize, value: i64);
}

/// Baseline strategy: recompute every sum
#[derive(Debug, Default, Clone, Copy)]
pub struct Uncached;

impl RangeStrategy for Uncached {
    fn range_sum(&mut self, array: &[i64], left: usize, right: usize) -> i64 {
        range_sum_no_cache(array, left, right)
    }

    fn update(&mut self, array: &mut [i64], index: usize, value: i64) {
        update_no_cache(array, index, value)
    }
}

/// Bounded LRU cache of range sums
///
/// The backing array stays with the caller and is passed into every call.
/// Updates go through [`RangeSumCache::update`] so that every cached range
/// covering the written index is dropped.
pub struct RangeSumCache {
    /// Cached sums, most recently used first
    cache: LruCache<RangeKey, i64>,

    /// Cache statistics
    stats: CacheStats,
}

impl RangeSumCache {
    /// Create a new cache holding at most `capacity` sums
    ///
    /// # Returns
    /// * `Err(Error::ZeroCapacity)` - If `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        Ok(Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::new(),
        })
    }

    /// Sum of `array[left..=right]`, served from cache when possible
    ///
    /// On a miss the sum is computed, stored, and the least recently used
    /// entry is evicted if the cache is over capacity.
    pub fn range_sum(&mut self, array: &[i64], left: usize, right: usize) -> i64 {
        let key = (left, right);

        if let Some(&sum) = self.cache.get(&key) {
            self.stats.record_hit();
            return sum;
        }

        self.stats.record_miss();
        let sum = range_sum_no_cache(array, left, right);
        if self.cache.put(key, sum).is_some() {
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        sum
    }

    /// Write `value` into `array[index]` and drop every cached range covering it
    ///
    /// # Returns
    /// * Number of invalidated entries
    pub fn update(&mut self, array: &mut [i64], index: usize, value: i64) -> usize {
        update_no_cache(array, index, value);

        let dropped = self
            .cache
            .retain(|&(left, right), _| !(left <= index && index <= right));
        self.stats.record_invalidations(dropped);

        dropped
    }

    /// Check whether the sum for `(left, right)` is cached
    pub fn contains(&self, left: usize, right: usize) -> bool {
        self.cache.contains_key(&(left, right))
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Drop every cached sum and reset statistics
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.reset();
    }
}

impl RangeStrategy for RangeSumCache {
    fn range_sum(&mut self, array: &[i64], left: usize, right: usize) -> i64 {
        RangeSumCache::range_sum(self, array, left, right)
    }

    fn update(&mut self, array: &mut [i64], index: usize, value: i64) {
        RangeSumCache::update(self, array, index, value);
    }
}
