//! Slotlock Benchmark
//!
//! Measures how a shared slot array behaves under concurrent access as the
//! thread count and the operation mix change.
//!
//! # Architecture
//!
//! The benchmark builds on `slotlock-array` and `slotlock-workload`:
//!
//! - **Workloads**: one operation stream per thread, generated in memory or
//!   loaded from workload files
//! - **Runs**: one fresh array per run, one OS thread per stream, wall-clock
//!   time from first spawn to last join
//! - **Reports**: per-cell timing (with percentiles over repetitions) and the
//!   classic threads-by-shape table
//!
//! # Example
//!
//! ```no_run
//! use slotlock_bench::{BenchConfig, BenchRunner};
//!
//! let config = BenchConfig::new(3)
//!     .with_thread_counts(vec![1, 2, 4])
//!     .with_ops_per_thread(50_000)
//!     .with_seed(7);
//!
//! let report = BenchRunner::new(config)?.run()?;
//! report.print_table();
//! # Ok::<(), slotlock_bench::BenchError>(())
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod runner;

pub use config::{BenchConfig, LockStrategy};
pub use error::BenchError;
pub use report::{BenchReport, CellReport};
pub use runner::{run_on, run_streams, BenchRunner, RunOutcome, RunTiming};
