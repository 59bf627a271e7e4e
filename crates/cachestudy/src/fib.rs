//! Fibonacci study: unbounded memo table vs splay tree memo store

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;
use memocache::{fibonacci_lru, fibonacci_splay, MemoTable};
use splaytree::SplayTree;
use tracing::{debug, info};

use crate::report::{FibReport, FibSample};

#[derive(Args, Debug, Clone)]
pub struct FibArgs {
    /// Distance between consecutive n values
    #[arg(short, long, default_value_t = 50)]
    pub step: u64,

    /// Number of n values to time, starting at 0
    #[arg(short, long, default_value_t = 19)]
    pub count: u64,

    /// Write the timing series to this JSON file
    #[arg(long)]
    pub json: Option<PathBuf>,
}

/// Time every n against stores shared across the whole sweep
///
/// Sharing the stores means each step only computes the terms the previous
/// steps left out, which is the behavior being compared.
pub fn run(args: &FibArgs) -> Result<FibReport> {
    let mut memo = MemoTable::new();
    let mut tree = SplayTree::new();
    let mut samples = Vec::new();

    info!("Sweeping n = 0..{} in steps of {}", args.count * args.step, args.step);

    for n in (0..args.count).map(|i| i * args.step) {
        let start = Instant::now();
        let lru_value = fibonacci_lru(n, &mut memo);
        let lru_seconds = start.elapsed().as_secs_f64();

        let start = Instant::now();
        let splay_value = fibonacci_splay(n, &mut tree);
        let splay_seconds = start.elapsed().as_secs_f64();

        if lru_value != splay_value {
            bail!("Memo strategies disagree on fib({})", n);
        }
        debug!(
            "n={} lru={:.8}s splay={:.8}s tree height={}",
            n,
            lru_seconds,
            splay_seconds,
            tree.height()
        );

        samples.push(FibSample {
            n,
            lru_seconds,
            splay_seconds,
        });
    }

    Ok(FibReport {
        samples,
        memo_entries: memo.len(),
        tree_nodes: tree.len(),
        tree_height: tree.height(),
    })
}
