//! Shared slot arrays for lock contention benchmarks.
//!
//! # Architecture
//!
//! - [`ProtectedArray`]: one reader-writer lock per slot, plus a consistent
//!   whole-array [`Snapshot`]
//! - [`CoarseLockedArray`]: one reader-writer lock over the whole array, used
//!   as the baseline the per-slot array is compared against
//! - [`Executor`]: replays one thread's operation stream against any
//!   [`SlotStore`]
//!
//! # Concurrency contract
//!
//! Out-of-range indices are silent no-ops (reads return `0`). Every operation
//! that holds more than one slot lock acquires them in ascending index order,
//! so no interleaving of reads, writes and snapshots can deadlock. A snapshot
//! holds every slot's shared lock at once, so no write on any slot completes
//! while it is in progress.
//!
//! # Example
//!
//! ```
//! use slotlock_array::{Executor, ProtectedArray};
//! use slotlock_types::Operation;
//!
//! let array = ProtectedArray::new(3);
//! let ops = [Operation::Write(0, 5), Operation::Write(1, 7), Operation::Snapshot];
//!
//! let stats = Executor::new(&array, &ops).run();
//! assert_eq!(stats.writes, 2);
//! assert_eq!(array.snapshot().values(), &[5, 7, 0]);
//! ```

mod coarse;
mod executor;
mod protected;
mod snapshot;
mod store;

pub use coarse::CoarseLockedArray;
pub use executor::{ExecutionStats, Executor, Observation};
pub use protected::ProtectedArray;
pub use snapshot::Snapshot;
pub use store::{slot_position, SlotStore, OUT_OF_RANGE_VALUE};
