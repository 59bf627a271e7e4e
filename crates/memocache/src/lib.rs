//! # memocache
//!
//! Caching strategies compared by the cache study.
//!
//! ## Architecture
//! - **LRU**: AHash index over a slot vector with an intrusive recency list
//! - **Range sums**: bounded LRU keyed by `(L, R)`, invalidated on overlapping updates
//! - **Memoization**: Fibonacci over an unbounded table or a splay tree
//! - **Workloads**: seeded query generation and a driver shared by all strategies
//!
//! Every cache is an explicitly constructed value; nothing is global.

#![warn(missing_docs)]

mod error;
mod lru;
mod memo;
mod range;
mod stats;
mod workload;

pub use error::{Error, Result};
pub use lru::LruCache;
pub use memo::{fibonacci_lru, fibonacci_splay, memoized_fibonacci, MemoStore, MemoTable};
pub use range::{range_sum_no_cache, update_no_cache, RangeKey, RangeStrategy, RangeSumCache, Uncached};
pub use stats::CacheStats;
pub use workload::{apply_query, run_workload, Query, Workload, WorkloadSpec};

/// Fibonacci values are unbounded integers; the study evaluates n up to 900
pub use num_bigint::BigUint;
