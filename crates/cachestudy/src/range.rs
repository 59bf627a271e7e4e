//! Range-sum study: the same workload with and without an LRU cache

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use memocache::{run_workload, Query, RangeStrategy, RangeSumCache, Uncached, WorkloadSpec};
use tracing::{debug, info};

use crate::report::RangeReport;

#[derive(Args, Debug, Clone)]
pub struct RangeArgs {
    /// Backing array length
    #[arg(short = 'n', long, default_value_t = 100_000)]
    pub size: usize,

    /// Number of queries in the workload
    #[arg(short, long, default_value_t = 50_000)]
    pub queries: usize,

    /// LRU cache capacity (number of cached ranges)
    #[arg(short, long, default_value_t = 1_000)]
    pub capacity: usize,

    /// Fraction of queries that are range sums
    #[arg(long, default_value_t = 0.7)]
    pub range_ratio: f64,

    /// Workload generator seed
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl RangeArgs {
    fn workload_spec(&self) -> WorkloadSpec {
        WorkloadSpec {
            array_len: self.size,
            queries: self.queries,
            range_ratio: self.range_ratio,
            seed: self.seed,
            ..WorkloadSpec::default()
        }
    }
}

/// Time one strategy over its own copy of the array
fn measure<S: RangeStrategy>(strategy: &mut S, array: &[i64], queries: &[Query]) -> (f64, i64) {
    let mut array = array.to_vec();
    let start = Instant::now();
    let checksum = run_workload(strategy, &mut array, queries);
    (start.elapsed().as_secs_f64(), checksum)
}

pub fn run(args: &RangeArgs) -> Result<RangeReport> {
    let workload = args
        .workload_spec()
        .generate()
        .context("Failed to generate workload")?;
    let mut cache = RangeSumCache::new(args.capacity).context("Failed to create range cache")?;

    let ranges = workload
        .queries
        .iter()
        .filter(|q| matches!(q, Query::Range { .. }))
        .count();
    info!(
        "Workload: N={} Q={} ({} ranges, {} updates), K={}",
        args.size,
        workload.queries.len(),
        ranges,
        workload.queries.len() - ranges,
        args.capacity
    );

    let (uncached_seconds, expected) = measure(&mut Uncached, &workload.array, &workload.queries);
    debug!("No cache: {:.4}s, checksum {}", uncached_seconds, expected);

    let (cached_seconds, actual) = measure(&mut cache, &workload.array, &workload.queries);
    debug!("LRU cache: {:.4}s, checksum {}", cached_seconds, actual);

    if actual != expected {
        bail!(
            "Cached and uncached range sums diverged (checksum {} vs {})",
            actual,
            expected
        );
    }

    Ok(RangeReport {
        uncached_seconds,
        cached_seconds,
        capacity: args.capacity,
        stats: *cache.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_args() -> RangeArgs {
        RangeArgs {
            size: 500,
            queries: 2_000,
            capacity: 50,
            range_ratio: 0.7,
            seed: 11,
        }
    }

    #[test]
    fn test_run_small_workload() {
        let report = run(&small_args()).unwrap();

        assert_eq!(report.capacity, 50);
        assert_eq!(report.stats.inserts(), report.stats.misses());
        assert!(report.stats.misses() > 0);
        assert!(report.uncached_seconds >= 0.0);
    }

    #[test]
    fn test_run_rejects_zero_capacity() {
        let args = RangeArgs {
            capacity: 0,
            ..small_args()
        };

        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("range cache"));
    }
}
