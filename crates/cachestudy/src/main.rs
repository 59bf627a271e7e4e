//! Cache Study - timing harness for the caching strategies in `memocache`

mod fib;
mod range;
mod report;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::fib::FibArgs;
use crate::range::RangeArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Only log warnings and errors (RUST_LOG still applies)
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Range-sum queries over a mutable array: no cache vs LRU cache
    Range(RangeArgs),

    /// Memoized Fibonacci: unbounded memo table vs splay tree
    Fib(FibArgs),
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Cache Study v{}", env!("CARGO_PKG_VERSION"));

    match args.command {
        Command::Range(range_args) => {
            let report = range::run(&range_args)?;
            report::print_range(&report);
        }
        Command::Fib(fib_args) => {
            let report = fib::run(&fib_args)?;
            report::print_fib(&report);
            if let Some(path) = &fib_args.json {
                report::write_json(&report, path)?;
                info!("Timing series written to {}", path.display());
            }
        }
    }

    Ok(())
}
