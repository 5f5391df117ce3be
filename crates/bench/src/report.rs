//! Benchmark results and their presentation.

use crate::config::LockStrategy;
use crate::runner::RunOutcome;
use crate::BenchError;
use hdrhistogram::Histogram;
use slotlock_array::ExecutionStats;
use slotlock_workload::WorkloadShape;
use std::fmt;
use std::time::Duration;

/// Results for one (thread count, shape) cell across all its repetitions.
#[derive(Debug, Clone)]
pub struct CellReport {
    threads: usize,
    shape: WorkloadShape,
    /// Run durations in microseconds.
    histogram: Histogram<u64>,
    total_elapsed: Duration,
    min: Duration,
    max: Duration,
    runs: usize,
    stats: ExecutionStats,
}

impl CellReport {
    /// Create an empty cell.
    pub fn new(threads: usize, shape: WorkloadShape) -> Result<Self, BenchError> {
        Ok(Self {
            threads,
            shape,
            histogram: Histogram::new(3)?,
            total_elapsed: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
            runs: 0,
            stats: ExecutionStats::default(),
        })
    }

    /// Add one run.
    pub fn record(&mut self, outcome: &RunOutcome) {
        let elapsed = outcome.timing.elapsed();

        self.histogram
            .saturating_record(elapsed.as_micros().min(u64::MAX as u128) as u64);
        self.total_elapsed += elapsed;
        self.min = self.min.min(elapsed);
        self.max = self.max.max(elapsed);
        self.runs += 1;
        self.stats.merge(&outcome.stats);
    }

    /// Thread count for this cell.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Workload shape for this cell.
    pub fn shape(&self) -> WorkloadShape {
        self.shape
    }

    /// Number of recorded runs.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Operation counts summed over every run.
    pub fn stats(&self) -> &ExecutionStats {
        &self.stats
    }

    /// Mean run duration.
    pub fn mean(&self) -> Duration {
        if self.runs == 0 {
            return Duration::ZERO;
        }
        self.total_elapsed / self.runs as u32
    }

    /// Fastest run.
    pub fn min(&self) -> Duration {
        if self.runs == 0 {
            Duration::ZERO
        } else {
            self.min
        }
    }

    /// Slowest run.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Run duration at `quantile` (0.0 to 1.0), at microsecond resolution.
    pub fn percentile(&self, quantile: f64) -> Duration {
        if self.runs == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.histogram.value_at_quantile(quantile.clamp(0.0, 1.0)))
    }

    /// Median run duration.
    pub fn p50(&self) -> Duration {
        self.percentile(0.5)
    }

    /// Operations per second over all runs.
    pub fn ops_per_sec(&self) -> f64 {
        let secs = self.total_elapsed.as_secs_f64();
        if secs > 0.0 {
            self.stats.total() as f64 / secs
        } else {
            0.0
        }
    }
}

/// Results for a whole benchmark matrix.
#[derive(Debug, Clone)]
pub struct BenchReport {
    array_size: usize,
    strategy: LockStrategy,
    shapes: Vec<WorkloadShape>,
    cells: Vec<CellReport>,
}

impl BenchReport {
    /// Create an empty report whose table columns are `shapes`.
    pub fn new(array_size: usize, strategy: LockStrategy, shapes: Vec<WorkloadShape>) -> Self {
        Self {
            array_size,
            strategy,
            shapes,
            cells: Vec::new(),
        }
    }

    /// Add a finished cell.
    pub fn push(&mut self, cell: CellReport) {
        self.cells.push(cell);
    }

    /// All cells, in the order they ran.
    pub fn cells(&self) -> &[CellReport] {
        &self.cells
    }

    /// Look up one cell.
    pub fn cell(&self, threads: usize, shape: WorkloadShape) -> Option<&CellReport> {
        self.cells
            .iter()
            .find(|cell| cell.threads == threads && cell.shape == shape)
    }

    /// Thread counts in the order they first ran.
    fn thread_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for cell in &self.cells {
            if !counts.contains(&cell.threads) {
                counts.push(cell.threads);
            }
        }
        counts
    }

    /// The threads-by-shape table as text. See the [`Display`](fmt::Display) impl.
    pub fn format_table(&self) -> String {
        self.to_string()
    }

    /// Print the threads-by-shape table.
    pub fn print_table(&self) {
        print!("{}", self.format_table());
    }

    /// Print per-cell detail.
    pub fn print_summary(&self) {
        println!("\n=== Benchmark Summary ===");
        println!("Array size:   {}", self.array_size);
        println!("Strategy:     {}", self.strategy);

        for cell in &self.cells {
            println!(
                "\n{} thread(s), {}: {} run(s)",
                cell.threads,
                cell.shape.label(),
                cell.runs
            );
            println!(
                "  Time:   mean {:?}, p50 {:?}, min {:?}, max {:?}",
                cell.mean(),
                cell.p50(),
                cell.min(),
                cell.max()
            );
            println!(
                "  Ops:    {} reads, {} writes, {} snapshots ({} out of range)",
                cell.stats.reads,
                cell.stats.writes,
                cell.stats.snapshots,
                cell.stats.out_of_range
            );
            println!("  Rate:   {:.0} ops/sec", cell.ops_per_sec());
        }
    }
}

/// Mean milliseconds per cell, one row per thread count, one column per shape.
impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = std::iter::once("Threads")
            .chain(self.shapes.iter().map(|shape| shape.label()))
            .collect::<Vec<_>>()
            .join(" | ");

        writeln!(f, "{}", header)?;
        writeln!(f, "{}", "-".repeat(header.len() + 2))?;

        for threads in self.thread_counts() {
            let mut row = format!("   {}    ", threads);
            for &shape in &self.shapes {
                match self.cell(threads, shape) {
                    Some(cell) => {
                        let millis = cell.mean().as_secs_f64() * 1_000.0;
                        row.push_str(&format!("|  {:.3}  ", millis));
                    }
                    None => row.push_str("|  -  "),
                }
            }
            writeln!(f, "{}", row.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::RunTiming;
    use std::time::Instant;

    fn outcome(millis: u64, reads: u64) -> RunOutcome {
        let started = Instant::now();
        RunOutcome {
            timing: RunTiming {
                started,
                finished: started + Duration::from_millis(millis),
            },
            stats: ExecutionStats {
                reads,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_cell_aggregates_runs() {
        let mut cell = CellReport::new(2, WorkloadShape::Equal).unwrap();
        cell.record(&outcome(10, 100));
        cell.record(&outcome(30, 100));
        cell.record(&outcome(20, 100));

        assert_eq!(cell.runs(), 3);
        assert_eq!(cell.mean(), Duration::from_millis(20));
        assert_eq!(cell.min(), Duration::from_millis(10));
        assert_eq!(cell.max(), Duration::from_millis(30));
        assert_eq!(cell.stats().reads, 300);

        let p50 = cell.p50().as_secs_f64();
        assert!((0.0195..0.0205).contains(&p50), "p50 was {}", p50);

        // 300 ops in 60ms.
        assert!((cell.ops_per_sec() - 5_000.0).abs() < 1.0);
    }

    #[test]
    fn test_empty_cell_is_zero() {
        let cell = CellReport::new(1, WorkloadShape::Skewed).unwrap();
        assert_eq!(cell.mean(), Duration::ZERO);
        assert_eq!(cell.min(), Duration::ZERO);
        assert_eq!(cell.p50(), Duration::ZERO);
        assert_eq!(cell.ops_per_sec(), 0.0);
    }

    #[test]
    fn test_table_layout() {
        let mut report = BenchReport::new(3, LockStrategy::PerSlot, WorkloadShape::ALL.to_vec());
        for threads in 1..=2 {
            for shape in WorkloadShape::ALL {
                let mut cell = CellReport::new(threads, shape).unwrap();
                cell.record(&outcome(threads as u64 * 2, 1));
                report.push(cell);
            }
        }

        let table = report.format_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Threads | Variant3 | Equal | Skewed");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "   1    |  2.000  |  2.000  |  2.000");
        assert_eq!(lines[3], "   2    |  4.000  |  4.000  |  4.000");
        assert_eq!(lines.len(), 4);
        assert_eq!(report.to_string(), table);
    }

    #[test]
    fn test_missing_cell_renders_placeholder() {
        let mut report = BenchReport::new(
            3,
            LockStrategy::Coarse,
            vec![WorkloadShape::Variant, WorkloadShape::Skewed],
        );
        let mut cell = CellReport::new(1, WorkloadShape::Variant).unwrap();
        cell.record(&outcome(1, 1));
        report.push(cell);

        assert!(report.format_table().contains("   1    |  1.000  |  -"));
        assert!(report.cell(1, WorkloadShape::Skewed).is_none());
    }
}
