//! Console output and JSON export of study results

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use memocache::CacheStats;
use serde::Serialize;

/// A strategy must be this much faster before the conclusion calls it a win
const SPEEDUP_THRESHOLD: f64 = 1.1;

/// Outcome of the range-sum study
#[derive(Debug, Clone)]
pub struct RangeReport {
    pub uncached_seconds: f64,
    pub cached_seconds: f64,
    pub capacity: usize,
    pub stats: CacheStats,
}

/// Timings for a single n
#[derive(Debug, Clone, Serialize)]
pub struct FibSample {
    pub n: u64,
    pub lru_seconds: f64,
    pub splay_seconds: f64,
}

/// Outcome of the Fibonacci study
#[derive(Debug, Clone, Serialize)]
pub struct FibReport {
    pub samples: Vec<FibSample>,
    pub memo_entries: usize,
    pub tree_nodes: usize,
    pub tree_height: usize,
}

impl FibReport {
    fn totals(&self) -> (f64, f64) {
        self.samples.iter().fold((0.0, 0.0), |(lru, splay), s| {
            (lru + s.lru_seconds, splay + s.splay_seconds)
        })
    }

    /// The sample where the splay tree fell furthest behind
    fn worst_splay_sample(&self) -> Option<&FibSample> {
        self.samples.iter().max_by(|a, b| {
            let gap_a = a.splay_seconds - a.lru_seconds;
            let gap_b = b.splay_seconds - b.lru_seconds;
            gap_a.total_cmp(&gap_b)
        })
    }
}

pub fn range_conclusion(report: &RangeReport) -> String {
    let speedup = report.uncached_seconds / report.cached_seconds.max(f64::EPSILON);

    if speedup >= SPEEDUP_THRESHOLD {
        format!(
            "The LRU cache paid off ({:.2}x faster): enough ranges repeated between updates \
             for {:.1}% of lookups to be served from cache.",
            speedup,
            report.stats.hit_ratio() * 100.0
        )
    } else {
        format!(
            "The LRU cache brings no meaningful speedup ({:.2}x). Summing a slice is already \
             cheap, random ranges rarely repeat ({:.1}% hit ratio), and updates invalidated \
             {} cached ranges, so the cache mostly adds bookkeeping.",
            speedup,
            report.stats.hit_ratio() * 100.0,
            report.stats.invalidations()
        )
    }
}

pub fn fib_conclusion(report: &FibReport) -> String {
    let (lru_total, splay_total) = report.totals();
    if report.samples.is_empty() {
        return "No samples were timed.".to_string();
    }

    let mut text = if splay_total * SPEEDUP_THRESHOLD < lru_total {
        format!(
            "The splay tree memo was faster overall ({:.6}s vs {:.6}s).",
            splay_total, lru_total
        )
    } else {
        format!(
            "The hash-table memo was faster overall ({:.6}s vs {:.6}s): every splay tree \
             lookup pays for a descent and rotations, while the table answers in constant time.",
            lru_total, splay_total
        )
    };

    if let Some(worst) = report.worst_splay_sample() {
        if worst.splay_seconds > worst.lru_seconds {
            text.push_str(&format!(
                " The widest gap was at n = {} ({:.8}s vs {:.8}s).",
                worst.n, worst.splay_seconds, worst.lru_seconds
            ));
        }
    }

    text.push_str(&format!(
        " The tree ended with {} nodes and height {}.",
        report.tree_nodes, report.tree_height
    ));
    text
}

pub fn print_range(report: &RangeReport) {
    println!(
        "Execution time without caching: {:.4} seconds",
        report.uncached_seconds
    );
    println!(
        "Execution time with LRU cache:  {:.4} seconds",
        report.cached_seconds
    );
    println!(
        "Cache (K={}): {} hits, {} misses, {} evictions, {} invalidations",
        report.capacity,
        report.stats.hits(),
        report.stats.misses(),
        report.stats.evictions(),
        report.stats.invalidations()
    );
    println!("\nConclusion:");
    println!("{}", range_conclusion(report));
}

pub fn print_fib(report: &FibReport) {
    println!("{}", fib_table(report));
    println!("\nConclusion:");
    println!("{}", fib_conclusion(report));
}

fn fib_table(report: &FibReport) -> String {
    let mut table = format!(
        "{:<10}{:<27}{}\n{}",
        "n",
        "LRU Cache Time (s)",
        "Splay Tree Time (s)",
        "-".repeat(55)
    );
    for sample in &report.samples {
        table.push_str(&format!(
            "\n{:<10}{:<27.8}{:.8}",
            sample.n, sample.lru_seconds, sample.splay_seconds
        ));
    }
    table
}

/// Write the Fibonacci timing series as pretty-printed JSON
pub fn write_json(report: &FibReport, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    writer.flush()?;
    Ok(())
}
