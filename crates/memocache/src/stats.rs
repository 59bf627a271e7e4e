//! Cache statistics tracking

/// Counters for range-sum cache behavior
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    evictions: u64,
    invalidations: u64,
    inserts: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_invalidations(&mut self, count: usize) {
        self.invalidations += count as u64;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    /// Lookups answered from the cache
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to compute
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Entries dropped to stay within capacity
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Entries dropped because an update touched their range
    pub fn invalidations(&self) -> u64 {
        self.invalidations
    }

    /// Entries stored after a miss
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
