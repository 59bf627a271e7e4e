//! Range-sum workloads: textual queries, seeded generation, and a driver

use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::{Error, Result};
use crate::range::RangeStrategy;

/// One operation against the backing array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Sum of `array[left..=right]`
    Range {
        /// First index, inclusive
        left: usize,
        /// Last index, inclusive
        right: usize,
    },
    /// Write `value` into `array[index]`
    Update {
        /// Position to overwrite
        index: usize,
        /// New element value
        value: i64,
    },
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Range { left, right } => write!(f, "Range {} {}", left, right),
            Query::Update { index, value } => write!(f, "Update {} {}", index, value),
        }
    }
}

impl FromStr for Query {
    type Err = Error;

    /// Parse `Range L R` or `Update INDEX VALUE`
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [kind, first, second] = parts.as_slice() else {
            return Err(Error::Parse(format!(
                "expected 3 fields, got {}: {:?}",
                parts.len(),
                s
            )));
        };

        match kind.to_ascii_lowercase().as_str() {
            "range" => {
                let left: usize = first.parse()?;
                let right: usize = second.parse()?;
                if left > right {
                    return Err(Error::Parse(format!("range start {} after end {}", left, right)));
                }
                Ok(Query::Range { left, right })
            }
            "update" => Ok(Query::Update {
                index: first.parse()?,
                value: second.parse()?,
            }),
            other => Err(Error::Parse(format!("unknown query kind '{}'", other))),
        }
    }
}

/// Parameters for generating a random workload
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSpec {
    /// Length of the backing array (N)
    pub array_len: usize,

    /// Number of queries (Q)
    pub queries: usize,

    /// Fraction of queries that are range sums; the rest are updates
    pub range_ratio: f64,

    /// Element and update values are drawn from `1..=max_value`
    pub max_value: i64,

    /// Generator seed; equal seeds give equal workloads
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            array_len: 100_000,
            queries: 50_000,
            range_ratio: 0.7,
            max_value: 1_000,
            seed: 0,
        }
    }
}

/// A generated backing array together with the queries to run against it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    /// Initial array contents
    pub array: Vec<i64>,

    /// Queries in execution order
    pub queries: Vec<Query>,
}

impl WorkloadSpec {
    /// Generate the array and the query sequence
    ///
    /// Range queries use two distinct indices in ascending order.
    ///
    /// # Returns
    /// * `Err(Error::InvalidWorkload)` - Array shorter than 2, ratio outside `[0, 1]`,
    ///   or a non-positive `max_value`
    pub fn generate(&self) -> Result<Workload> {
        self.validate()?;
        let mut rng = Pcg64::seed_from_u64(self.seed);

        let array = (0..self.array_len)
            .map(|_| rng.random_range(1..=self.max_value))
            .collect();

        let queries = (0..self.queries)
            .map(|_| {
                if rng.random::<f64>() < self.range_ratio {
                    let a = rng.random_range(0..self.array_len);
                    let mut b = rng.random_range(0..self.array_len - 1);
                    if b >= a {
                        b += 1;
                    }
                    Query::Range {
                        left: a.min(b),
                        right: a.max(b),
                    }
                } else {
                    Query::Update {
                        index: rng.random_range(0..self.array_len),
                        value: rng.random_range(1..=self.max_value),
                    }
                }
            })
            .collect();

        Ok(Workload { array, queries })
    }

    fn validate(&self) -> Result<()> {
        if self.array_len < 2 {
            return Err(Error::InvalidWorkload(format!(
                "array length {} leaves no distinct range bounds",
                self.array_len
            )));
        }
        if !(0.0..=1.0).contains(&self.range_ratio) {
            return Err(Error::InvalidWorkload(format!(
                "range ratio {} outside [0, 1]",
                self.range_ratio
            )));
        }
        if self.max_value < 1 {
            return Err(Error::InvalidWorkload(format!(
                "max value {} must be positive",
                self.max_value
            )));
        }
        Ok(())
    }
}

/// Apply one query through `strategy`
///
/// # Returns
/// * `Some(sum)` - For range queries
/// * `None` - For updates
pub fn apply_query<S>(strategy: &mut S, array: &mut [i64], query: Query) -> Option<i64>
where
    S: RangeStrategy + ?Sized,
{
    match query {
        Query::Range { left, right } => Some(strategy.range_sum(array, left, right)),
        Query::Update { index, value } => {
            strategy.update(array, index, value);
            None
        }
    }
}

/// Run every query in order and fold the range results into a checksum
///
/// Two strategies that agree on every sum produce the same checksum.
pub fn run_workload<S>(strategy: &mut S, array: &mut [i64], queries: &[Query]) -> i64
where
    S: RangeStrategy + ?Sized,
{
    queries
        .iter()
        .filter_map(|&query| apply_query(strategy, array, query))
        .fold(0i64, |acc, sum| acc.wrapping_mul(31).wrapping_add(sum))
}
