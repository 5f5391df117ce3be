//! Benchmark runner.
//!
//! Spawns one executor thread per operation stream over a shared array and
//! times the whole run, from first spawn to last join.

use crate::config::{BenchConfig, LockStrategy};
use crate::report::{BenchReport, CellReport};
use crate::BenchError;
use slotlock_array::{CoarseLockedArray, ExecutionStats, Executor, ProtectedArray, SlotStore};
use slotlock_types::Operation;
use slotlock_workload::{generate_files, load_streams, WorkloadModel, WorkloadShape};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Wall-clock bounds of one run, with all executor threads active in between.
#[derive(Clone, Copy, Debug)]
pub struct RunTiming {
    /// Taken just before the first executor is spawned.
    pub started: Instant,
    /// Taken just after the last executor is joined.
    pub finished: Instant,
}

impl RunTiming {
    /// Time between first spawn and last join.
    pub fn elapsed(&self) -> Duration {
        self.finished.duration_since(self.started)
    }
}

/// Result of replaying a set of streams once.
#[derive(Clone, Copy, Debug)]
pub struct RunOutcome {
    /// When the run started and finished.
    pub timing: RunTiming,
    /// Counts summed over every executor.
    pub stats: ExecutionStats,
}

/// Replay every stream on its own thread against `store`.
///
/// The store is the only state the threads share. Each stream is borrowed by
/// exactly one executor.
pub fn run_on<S: SlotStore>(
    store: &S,
    streams: &[Vec<Operation>],
) -> Result<RunOutcome, BenchError> {
    let started = Instant::now();

    let per_thread = thread::scope(|scope| -> Result<Vec<ExecutionStats>, BenchError> {
        let mut handles = Vec::with_capacity(streams.len());
        for (index, ops) in streams.iter().enumerate() {
            let handle = thread::Builder::new()
                .name(format!("executor-{}", index))
                .spawn_scoped(scope, move || Executor::new(store, ops).run())
                .map_err(BenchError::Spawn)?;
            handles.push(handle);
        }

        handles
            .into_iter()
            .enumerate()
            .map(|(thread, handle)| {
                handle
                    .join()
                    .map_err(|_| BenchError::ExecutorPanicked { thread })
            })
            .collect::<Result<Vec<_>, _>>()
    })?;

    let finished = Instant::now();

    let mut stats = ExecutionStats::default();
    for thread_stats in &per_thread {
        stats.merge(thread_stats);
    }

    Ok(RunOutcome {
        timing: RunTiming { started, finished },
        stats,
    })
}

/// Build a fresh array for `strategy` and replay `streams` against it.
pub fn run_streams(
    strategy: LockStrategy,
    array_size: usize,
    streams: &[Vec<Operation>],
) -> Result<RunOutcome, BenchError> {
    match strategy {
        LockStrategy::PerSlot => run_on(&ProtectedArray::new(array_size), streams),
        LockStrategy::Coarse => run_on(&CoarseLockedArray::new(array_size), streams),
    }
}

/// Runs the (thread count x shape) matrix described by a [`BenchConfig`].
pub struct BenchRunner {
    config: BenchConfig,
}

impl BenchRunner {
    /// Create a runner, rejecting configurations that cannot run.
    pub fn new(config: BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this runner executes.
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Write workload files for every shape, one per thread up to the largest
    /// thread count.
    pub fn generate_workloads(&self) -> Result<Vec<PathBuf>, BenchError> {
        let dir = self.config.workload_dir.as_deref().ok_or_else(|| {
            BenchError::InvalidConfig("generating files needs a workload directory".to_string())
        })?;

        let mut paths = Vec::new();
        for &shape in &self.config.shapes {
            paths.extend(generate_files(
                dir,
                shape,
                self.config.max_threads(),
                self.config.ops_per_thread,
                self.config.seed,
            )?);
        }

        Ok(paths)
    }

    /// Run every cell of the matrix.
    pub fn run(&self) -> Result<BenchReport, BenchError> {
        info!(
            array_size = self.config.array_size,
            strategy = %self.config.strategy,
            thread_counts = ?self.config.thread_counts,
            shapes = ?self.config.shapes,
            ops_per_thread = self.config.ops_per_thread,
            repetitions = self.config.repetitions,
            "Starting benchmark"
        );

        let mut report = BenchReport::new(
            self.config.array_size,
            self.config.strategy,
            self.config.shapes.clone(),
        );

        for &threads in &self.config.thread_counts {
            for &shape in &self.config.shapes {
                report.push(self.run_cell(threads, shape)?);
            }
        }

        Ok(report)
    }

    /// Run one (thread count, shape) cell `repetitions` times.
    pub fn run_cell(&self, threads: usize, shape: WorkloadShape) -> Result<CellReport, BenchError> {
        let streams = self.streams_for(shape, threads)?;
        let mut cell = CellReport::new(threads, shape)?;

        for repetition in 0..self.config.repetitions {
            let outcome = run_streams(self.config.strategy, self.config.array_size, &streams)?;
            debug!(
                threads,
                shape = %shape,
                repetition,
                elapsed_us = outcome.timing.elapsed().as_micros() as u64,
                "Run finished"
            );
            cell.record(&outcome);
        }

        info!(
            threads,
            shape = %shape,
            mean_ms = cell.mean().as_secs_f64() * 1_000.0,
            ops = cell.stats().total(),
            "Cell finished"
        );

        Ok(cell)
    }

    /// Per-thread streams for one cell, from files or generated in memory.
    fn streams_for(
        &self,
        shape: WorkloadShape,
        threads: usize,
    ) -> Result<Vec<Vec<Operation>>, BenchError> {
        match &self.config.workload_dir {
            Some(dir) => Ok(load_streams(dir, shape, threads)?),
            None => {
                let model = WorkloadModel::from_shape(shape)?;
                Ok(model.generate_streams(threads, self.config.ops_per_thread, self.config.seed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn scenario() -> Vec<Operation> {
        vec![
            Operation::Write(0, 5),
            Operation::Write(1, 7),
            Operation::Read(0),
            Operation::Snapshot,
            Operation::Write(2, 9),
            Operation::Snapshot,
        ]
    }

    #[test]
    fn test_run_on_leaves_final_state() {
        let array = ProtectedArray::new(3);
        let outcome = run_on(&array, &[scenario()]).unwrap();

        assert_eq!(outcome.stats.total(), 6);
        assert_eq!(array.snapshot().values(), &[5, 7, 9]);
        assert!(outcome.timing.finished >= outcome.timing.started);
    }

    #[test]
    fn test_run_on_sums_stats_across_threads() {
        let array = ProtectedArray::new(3);
        let streams = vec![scenario(), scenario(), vec![Operation::Read(7)]];

        let outcome = run_on(&array, &streams).unwrap();

        assert_eq!(outcome.stats.writes, 6);
        assert_eq!(outcome.stats.snapshots, 4);
        assert_eq!(outcome.stats.reads, 3);
        assert_eq!(outcome.stats.out_of_range, 1);
    }

    #[test]
    fn test_run_with_no_streams_is_immediate() {
        let outcome = run_streams(LockStrategy::PerSlot, 3, &[]).unwrap();
        assert_eq!(outcome.stats, ExecutionStats::default());
    }

    #[test]
    fn test_both_strategies_replay_everything() {
        let streams = vec![scenario(); 4];
        for strategy in [LockStrategy::PerSlot, LockStrategy::Coarse] {
            let outcome = run_streams(strategy, 3, &streams).unwrap();
            assert_eq!(outcome.stats.total(), 24);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            BenchRunner::new(BenchConfig::new(0)),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[traced_test]
    #[test]
    fn test_in_memory_matrix() {
        let config = BenchConfig::default()
            .with_thread_counts(vec![1, 2])
            .with_ops_per_thread(500)
            .with_repetitions(2)
            .with_seed(3);

        let report = BenchRunner::new(config).unwrap().run().unwrap();

        assert_eq!(report.cells().len(), 2 * WorkloadShape::ALL.len());
        let cell = report.cell(2, WorkloadShape::Skewed).unwrap();
        assert_eq!(cell.runs(), 2);
        assert_eq!(cell.stats().total(), 2 * 2 * 500);
        assert!(logs_contain("Cell finished"));
    }

    #[test]
    fn test_generate_requires_directory() {
        let runner = BenchRunner::new(BenchConfig::default()).unwrap();
        assert!(matches!(
            runner.generate_workloads(),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_file_backed_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig::default()
            .with_thread_counts(vec![1, 3])
            .with_shapes(vec![WorkloadShape::Equal])
            .with_ops_per_thread(100)
            .with_workload_dir(dir.path())
            .with_strategy(LockStrategy::Coarse);

        let runner = BenchRunner::new(config).unwrap();
        let paths = runner.generate_workloads().unwrap();
        assert_eq!(paths.len(), 3);

        let report = runner.run().unwrap();
        let cell = report.cell(3, WorkloadShape::Equal).unwrap();
        assert_eq!(cell.stats().total(), 300);
    }

    #[test]
    fn test_missing_files_surface_as_workload_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = BenchConfig::default().with_workload_dir(dir.path());

        let result = BenchRunner::new(config).unwrap().run();
        assert!(matches!(result, Err(BenchError::Workload(_))));
    }
}
