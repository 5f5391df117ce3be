//! Slotlock Benchmark CLI
//!
//! Generate per-thread workload files and measure how long a set of threads
//! takes to replay them against a shared per-slot locked array.
//!
//! # Example
//!
//! ```bash
//! # Generate workload files and run the classic 1..3 thread matrix
//! slotlock-bench all --dir workloads
//!
//! # Only write workload files
//! slotlock-bench generate --dir workloads --threads 1,2,4,8 --ops 100000
//!
//! # Run with in-memory workloads against the single-lock baseline
//! slotlock-bench run --threads 1,2,4,8 --strategy coarse --repetitions 5
//! ```

use clap::{Args, Parser, Subcommand};
use slotlock_bench::{BenchConfig, BenchRunner, LockStrategy};
use slotlock_workload::WorkloadShape;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slotlock-bench")]
#[command(about = "Thread-scaling benchmark for per-slot reader-writer locked arrays")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one workload file per thread for every shape
    Generate {
        /// Directory to write workload files into
        #[arg(long, default_value = "workloads")]
        dir: PathBuf,

        #[command(flatten)]
        bench: BenchArgs,
    },

    /// Run the benchmark matrix
    Run {
        /// Load workload files from this directory instead of generating in memory
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Print per-cell detail after the table
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        bench: BenchArgs,
    },

    /// Generate workload files, then run the matrix against them
    All {
        /// Directory to write and read workload files
        #[arg(long, default_value = "workloads")]
        dir: PathBuf,

        /// Print per-cell detail after the table
        #[arg(long)]
        summary: bool,

        #[command(flatten)]
        bench: BenchArgs,
    },
}

#[derive(Args)]
struct BenchArgs {
    /// Number of slots in the shared array
    #[arg(short = 'm', long, default_value = "3")]
    array_size: usize,

    /// Thread counts to measure (comma-separated)
    #[arg(short, long, value_delimiter = ',', default_value = "1,2,3")]
    threads: Vec<usize>,

    /// Workload shapes to measure (variant, equal, skewed)
    #[arg(long, value_delimiter = ',', default_value = "variant,equal,skewed")]
    shapes: Vec<WorkloadShape>,

    /// Operations per thread
    #[arg(long, default_value = "20000")]
    ops: usize,

    /// Runs per (threads, shape) cell
    #[arg(short, long, default_value = "1")]
    repetitions: usize,

    /// Workload seed. A random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Locking strategy for the shared array
    #[arg(long, value_enum, default_value_t = LockStrategy::PerSlot)]
    strategy: LockStrategy,
}

impl BenchArgs {
    fn into_config(self) -> BenchConfig {
        let seed = self.seed.unwrap_or_else(rand::random);

        BenchConfig::new(self.array_size)
            .with_thread_counts(self.threads)
            .with_shapes(self.shapes)
            .with_ops_per_thread(self.ops)
            .with_repetitions(self.repetitions)
            .with_seed(seed)
            .with_strategy(self.strategy)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,slotlock_bench=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { dir, bench } => {
            let runner = BenchRunner::new(bench.into_config().with_workload_dir(dir))?;
            let paths = runner.generate_workloads()?;
            info!(
                seed = runner.config().seed,
                files = paths.len(),
                "Workload files written"
            );
            println!("Files generated.");
        }

        Commands::Run {
            dir,
            summary,
            bench,
        } => {
            let mut config = bench.into_config();
            if let Some(dir) = dir {
                config = config.with_workload_dir(dir);
            }

            let report = BenchRunner::new(config)?.run()?;
            report.print_table();
            if summary {
                report.print_summary();
            }
        }

        Commands::All {
            dir,
            summary,
            bench,
        } => {
            let runner = BenchRunner::new(bench.into_config().with_workload_dir(dir))?;
            runner.generate_workloads()?;
            println!("Files generated.\n");

            let report = runner.run()?;
            report.print_table();
            if summary {
                report.print_summary();
            }
        }
    }

    Ok(())
}
