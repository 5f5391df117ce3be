//! Error types for benchmark runs.

use slotlock_workload::WorkloadError;
use thiserror::Error;

/// Errors while configuring or running a benchmark.
#[derive(Debug, Error)]
pub enum BenchError {
    /// The configuration cannot describe a runnable benchmark.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generating or loading workloads failed.
    #[error(transparent)]
    Workload(#[from] WorkloadError),

    /// The OS refused to start an executor thread.
    #[error("Failed to spawn executor thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// An executor thread panicked while replaying its stream.
    #[error("Executor thread {thread} panicked")]
    ExecutorPanicked { thread: usize },

    /// Timing histogram could not be created.
    #[error("Failed to create timing histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}
