//! Memoized Fibonacci over interchangeable memo stores

use std::collections::HashMap;

use ahash::RandomState;
use num_bigint::BigUint;
use splaytree::SplayTree;

/// Storage for already computed Fibonacci terms
pub trait MemoStore {
    /// Look up the term for `n`
    fn recall(&mut self, n: u64) -> Option<BigUint>;

    /// Store the term for `n`
    fn remember(&mut self, n: u64, value: BigUint);
}

/// Unbounded hash table of computed terms; the baseline store
#[derive(Debug, Default)]
pub struct MemoTable {
    table: HashMap<u64, BigUint, RandomState>,
    hits: u64,
    misses: u64,
}

impl MemoTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of memoized terms
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if nothing has been memoized yet
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Lookups answered from the table
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Forget every term and reset the counters
    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

impl MemoStore for MemoTable {
    fn recall(&mut self, n: u64) -> Option<BigUint> {
        match self.table.get(&n) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    fn remember(&mut self, n: u64, value: BigUint) {
        self.table.insert(n, value);
    }
}

/// Hits are splayed to the root, so recently computed terms stay shallow
impl MemoStore for SplayTree<u64, BigUint> {
    fn recall(&mut self, n: u64) -> Option<BigUint> {
        self.find(&n).map(|(_, value)| value.clone())
    }

    fn remember(&mut self, n: u64, value: BigUint) {
        self.insert(n, value);
    }
}

enum Step {
    /// Produce `fib(n)`
    Eval(u64),
    /// Add the two results on top of the stack and memoize them as `fib(n)`
    Combine(u64),
}

/// Compute the `n`th Fibonacci number, memoizing every term above 1 in `memo`
///
/// Terms are visited in the same order as the naive recursion would visit
/// them: `fib(n - 1)` completely before `fib(n - 2)`, and `n` is stored after
/// both. An explicit stack replaces the call stack, so large `n` is safe.
/// `fib(0)` and `fib(1)` never touch the store.
pub fn memoized_fibonacci<M>(n: u64, memo: &mut M) -> BigUint
where
    M: MemoStore + ?Sized,
{
    let mut steps = vec![Step::Eval(n)];
    let mut results: Vec<BigUint> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Eval(k) if k <= 1 => results.push(BigUint::from(k)),
            Step::Eval(k) => match memo.recall(k) {
                Some(value) => results.push(value),
                None => {
                    steps.push(Step::Combine(k));
                    steps.push(Step::Eval(k - 2));
                    steps.push(Step::Eval(k - 1));
                }
            },
            Step::Combine(k) => {
                let older = results.pop();
                let newer = results.pop();
                let (Some(newer), Some(older)) = (newer, older) else {
                    unreachable!("combine for fib({k}) without both operands");
                };
                let value = newer + older;
                memo.remember(k, value.clone());
                results.push(value);
            }
        }
    }

    results.pop().unwrap_or_default()
}

/// Fibonacci memoized in an unbounded hash table
pub fn fibonacci_lru(n: u64, memo: &mut MemoTable) -> BigUint {
    memoized_fibonacci(n, memo)
}

/// Fibonacci memoized in a splay tree
pub fn fibonacci_splay(n: u64, tree: &mut SplayTree<u64, BigUint>) -> BigUint {
    memoized_fibonacci(n, tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every store interaction in order
    #[derive(Default)]
    struct Recorder {
        table: HashMap<u64, BigUint>,
        log: Vec<String>,
    }

    impl MemoStore for Recorder {
        fn recall(&mut self, n: u64) -> Option<BigUint> {
            let value = self.table.get(&n).cloned();
            let outcome = if value.is_some() { "hit" } else { "miss" };
            self.log.push(format!("{outcome} {n}"));
            value
        }

        fn remember(&mut self, n: u64, value: BigUint) {
            self.log.push(format!("store {n}"));
            self.table.insert(n, value);
        }
    }

    #[test]
    fn test_base_cases_skip_store() {
        let mut memo = MemoTable::new();

        assert_eq!(fibonacci_lru(0, &mut memo), BigUint::from(0u32));
        assert_eq!(fibonacci_lru(1, &mut memo), BigUint::from(1u32));
        assert!(memo.is_empty());
        assert_eq!(memo.misses(), 0);
    }

    #[test]
    fn test_visit_order_matches_recursion() {
        let mut recorder = Recorder::default();

        assert_eq!(memoized_fibonacci(4, &mut recorder), BigUint::from(3u32));

        // fib(4) -> fib(3) -> fib(2) -> {fib(1), fib(0)}; then fib(1); then fib(2) again
        assert_eq!(
            recorder.log,
            vec!["miss 4", "miss 3", "miss 2", "store 2", "store 3", "hit 2", "store 4"]
        );
    }

    #[test]
    fn test_memo_table_counts() {
        let mut memo = MemoTable::new();

        assert_eq!(fibonacci_lru(10, &mut memo), BigUint::from(55u32));
        assert_eq!(memo.len(), 9);
        let misses = memo.misses();

        assert_eq!(fibonacci_lru(10, &mut memo), BigUint::from(55u32));
        assert_eq!(memo.misses(), misses);
        assert!(memo.hits() > 0);

        memo.clear();
        assert!(memo.is_empty());
        assert_eq!(memo.hits(), 0);
    }

    #[test]
    fn test_splay_memo_leaves_last_term_near_root() {
        let mut tree = SplayTree::new();

        assert_eq!(fibonacci_splay(20, &mut tree), BigUint::from(6_765u32));
        assert_eq!(tree.len(), 19);
        assert!(tree.is_valid_bst());

        fibonacci_splay(20, &mut tree);
        assert_eq!(tree.root_key(), Some(&20));
    }

    #[test]
    fn test_large_n_does_not_overflow_stack() {
        let mut memo = MemoTable::new();
        let mut tree = SplayTree::new();

        let lru = fibonacci_lru(5_000, &mut memo);
        let splay = fibonacci_splay(5_000, &mut tree);

        assert_eq!(lru, splay);
        assert_eq!(lru.bits(), 3_471);
    }
}
