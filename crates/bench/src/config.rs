//! Configuration types for the benchmark.

use crate::BenchError;
use slotlock_workload::WorkloadShape;
use std::fmt;
use std::path::PathBuf;

/// Default number of slots in the shared array.
pub const DEFAULT_ARRAY_SIZE: usize = 3;

/// Default number of operations in each thread's stream.
pub const DEFAULT_OPS_PER_THREAD: usize = 20_000;

/// How the shared array is locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LockStrategy {
    /// One reader-writer lock per slot.
    #[default]
    PerSlot,

    /// One reader-writer lock for the whole array.
    Coarse,
}

impl fmt::Display for LockStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockStrategy::PerSlot => f.write_str("per-slot"),
            LockStrategy::Coarse => f.write_str("coarse"),
        }
    }
}

/// Configuration for a benchmark matrix.
///
/// Every (thread count, shape) pair is one cell of the matrix. Each cell is
/// run `repetitions` times, each time against a fresh array.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    /// Number of slots in the shared array.
    pub array_size: usize,

    /// Thread counts to measure, in report row order.
    pub thread_counts: Vec<usize>,

    /// Workload shapes to measure, in report column order.
    pub shapes: Vec<WorkloadShape>,

    /// Operations in each thread's stream.
    pub ops_per_thread: usize,

    /// Runs per cell.
    pub repetitions: usize,

    /// Seed for workload generation.
    pub seed: u64,

    /// Locking strategy for the shared array.
    pub strategy: LockStrategy,

    /// Directory holding workload files. `None` generates streams in memory.
    pub workload_dir: Option<PathBuf>,
}

impl BenchConfig {
    /// Create a configuration for an array of `array_size` slots.
    pub fn new(array_size: usize) -> Self {
        Self {
            array_size,
            thread_counts: vec![1, 2, 3],
            shapes: WorkloadShape::ALL.to_vec(),
            ops_per_thread: DEFAULT_OPS_PER_THREAD,
            repetitions: 1,
            seed: 12345,
            strategy: LockStrategy::default(),
            workload_dir: None,
        }
    }

    /// Set the array size.
    pub fn with_array_size(mut self, array_size: usize) -> Self {
        self.array_size = array_size;
        self
    }

    /// Set the thread counts to measure.
    pub fn with_thread_counts(mut self, thread_counts: Vec<usize>) -> Self {
        self.thread_counts = thread_counts;
        self
    }

    /// Set the workload shapes to measure.
    pub fn with_shapes(mut self, shapes: Vec<WorkloadShape>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Set the stream length per thread.
    pub fn with_ops_per_thread(mut self, ops: usize) -> Self {
        self.ops_per_thread = ops;
        self
    }

    /// Set the number of runs per cell.
    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    /// Set the workload seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the locking strategy.
    pub fn with_strategy(mut self, strategy: LockStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Read and write workload files under `dir`.
    pub fn with_workload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workload_dir = Some(dir.into());
        self
    }

    /// Largest configured thread count.
    pub fn max_threads(&self) -> usize {
        self.thread_counts.iter().copied().max().unwrap_or(0)
    }

    /// Check that the configuration describes a runnable benchmark.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.array_size == 0 {
            return Err(BenchError::InvalidConfig(
                "array size must be at least 1".to_string(),
            ));
        }
        if self.thread_counts.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one thread count is required".to_string(),
            ));
        }
        if self.thread_counts.contains(&0) {
            return Err(BenchError::InvalidConfig(
                "thread counts must be at least 1".to_string(),
            ));
        }
        if self.shapes.is_empty() {
            return Err(BenchError::InvalidConfig(
                "at least one workload shape is required".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(BenchError::InvalidConfig(
                "repetitions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ARRAY_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_matrix() {
        let config = BenchConfig::default();
        assert_eq!(config.array_size, 3);
        assert_eq!(config.thread_counts, vec![1, 2, 3]);
        assert_eq!(config.shapes, WorkloadShape::ALL.to_vec());
        assert_eq!(config.ops_per_thread, 20_000);
        assert_eq!(config.max_threads(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_configs() {
        let invalid = [
            BenchConfig::new(0),
            BenchConfig::default().with_thread_counts(Vec::new()),
            BenchConfig::default().with_thread_counts(vec![1, 0]),
            BenchConfig::default().with_shapes(Vec::new()),
            BenchConfig::default().with_repetitions(0),
        ];

        for config in invalid {
            assert!(
                matches!(config.validate(), Err(BenchError::InvalidConfig(_))),
                "Expected {:?} to be rejected",
                config
            );
        }
    }

    #[test]
    fn test_empty_streams_are_valid() {
        assert!(BenchConfig::default()
            .with_ops_per_thread(0)
            .validate()
            .is_ok());
    }
}
