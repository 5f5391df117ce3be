//! Replay of one thread's operation stream.

use crate::{SlotStore, Snapshot};
use slotlock_types::{Operation, SlotIndex, SlotValue};
use std::hint::black_box;

/// Counts of what an executor did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Read operations replayed.
    pub reads: u64,
    /// Write operations replayed.
    pub writes: u64,
    /// Snapshot operations replayed.
    pub snapshots: u64,
    /// Reads and writes whose index fell outside the array (no-ops).
    pub out_of_range: u64,
}

impl ExecutionStats {
    /// Total operations replayed.
    pub fn total(&self) -> u64 {
        self.reads + self.writes + self.snapshots
    }

    /// Fold another executor's counts into this one.
    pub fn merge(&mut self, other: &ExecutionStats) {
        self.reads += other.reads;
        self.writes += other.writes;
        self.snapshots += other.snapshots;
        self.out_of_range += other.out_of_range;
    }
}

/// What a single replayed operation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation<'a> {
    /// A read returned `value`.
    Read { index: SlotIndex, value: SlotValue },
    /// A write was issued.
    Write { index: SlotIndex, value: SlotValue },
    /// A snapshot was taken.
    Snapshot(&'a Snapshot),
}

/// Replays one operation stream against a shared store.
///
/// Operations run strictly in stream order on the calling thread. Nothing
/// here coordinates with other executors; the only cross-thread guarantees
/// are the ones the store provides.
pub struct Executor<'a, S: SlotStore + ?Sized> {
    store: &'a S,
    ops: &'a [Operation],
}

impl<'a, S: SlotStore + ?Sized> Executor<'a, S> {
    /// Create an executor for `ops` over `store`.
    pub fn new(store: &'a S, ops: &'a [Operation]) -> Self {
        Self { store, ops }
    }

    /// Replay the whole stream, discarding results.
    ///
    /// Read values and snapshot sizes are still observed so the work cannot
    /// be optimized away.
    pub fn run(self) -> ExecutionStats {
        self.run_with(|_| {})
    }

    /// Replay the whole stream, handing every result to `observe`.
    pub fn run_with<F>(self, mut observe: F) -> ExecutionStats
    where
        F: FnMut(Observation<'_>),
    {
        let mut stats = ExecutionStats::default();

        for op in self.ops {
            if op.index().is_some_and(|index| !self.store.contains(index)) {
                stats.out_of_range += 1;
            }

            match *op {
                Operation::Read(index) => {
                    stats.reads += 1;
                    let value = black_box(self.store.read(index));
                    observe(Observation::Read { index, value });
                }
                Operation::Write(index, value) => {
                    stats.writes += 1;
                    self.store.write(index, value);
                    observe(Observation::Write { index, value });
                }
                Operation::Snapshot => {
                    stats.snapshots += 1;
                    let snapshot = self.store.snapshot();
                    black_box(snapshot.rendered_len());
                    observe(Observation::Snapshot(&snapshot));
                }
            }
        }

        stats
    }
}
