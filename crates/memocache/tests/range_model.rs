//! Randomized comparison of the cached range-sum path against recomputation

use memocache::{range_sum_no_cache, run_workload, Query, RangeSumCache, Uncached, WorkloadSpec};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

#[test]
fn test_cached_matches_uncached_on_generated_workload() {
    let spec = WorkloadSpec {
        array_len: 200,
        queries: 5_000,
        seed: 17,
        ..WorkloadSpec::default()
    };
    let workload = spec.generate().unwrap();

    let mut plain = workload.array.clone();
    let mut cached = workload.array.clone();
    let mut cache = RangeSumCache::new(16).unwrap();

    let expected = run_workload(&mut Uncached, &mut plain, &workload.queries);
    let actual = run_workload(&mut cache, &mut cached, &workload.queries);

    assert_eq!(actual, expected);
    assert_eq!(plain, cached);
    assert!(cache.len() <= 16);
}

#[test]
fn test_every_answer_is_fresh() {
    let mut rng = Pcg64::seed_from_u64(3);
    let mut array: Vec<i64> = (0..32).map(|_| rng.random_range(-50..50)).collect();
    let mut cache = RangeSumCache::new(8).unwrap();

    for _ in 0..10_000 {
        if rng.random_bool(0.6) {
            let left = rng.random_range(0..array.len());
            let right = rng.random_range(left..array.len());
            let cached = cache.range_sum(&array, left, right);
            assert_eq!(cached, range_sum_no_cache(&array, left, right));
        } else {
            let index = rng.random_range(0..array.len());
            let value = rng.random_range(-50..50);
            cache.update(&mut array, index, value);
        }
        assert!(cache.len() <= cache.capacity());
    }

    let stats = cache.stats();
    assert!(stats.hits() > 0);
    assert!(stats.invalidations() > 0);
    assert_eq!(stats.inserts(), stats.misses());
}

#[test]
fn test_invalidation_only_touches_covering_ranges() {
    let mut array = vec![1i64; 20];
    let mut cache = RangeSumCache::new(100).unwrap();

    let ranges: Vec<(usize, usize)> = (0..20)
        .flat_map(|l| (l..20).step_by(3).map(move |r| (l, r)))
        .collect();
    assert!(ranges.len() <= 100);
    for &(l, r) in &ranges {
        cache.range_sum(&array, l, r);
    }

    cache.update(&mut array, 10, 5);

    for &(l, r) in &ranges {
        let covers = l <= 10 && 10 <= r;
        assert_eq!(cache.contains(l, r), !covers, "range ({l}, {r})");
    }
}

#[test]
fn test_documented_example() {
    let mut array = vec![1, 2, 3, 4, 5];
    let mut cache = RangeSumCache::new(1_000).unwrap();

    assert_eq!(cache.range_sum(&array, 1, 3), 9);
    cache.update(&mut array, 2, 100);
    assert_eq!(cache.range_sum(&array, 1, 3), 106);
    assert_eq!(cache.stats().hits(), 0);

    let query: Query = "Range 1 3".parse().unwrap();
    assert_eq!(query, Query::Range { left: 1, right: 3 });
}
