//! Operations replayed against a shared slot array.

use std::fmt;

/// Index of a slot as parsed from a workload.
///
/// Signed on purpose: workloads may carry negative or otherwise stale indices,
/// and range checking belongs to the array rather than to this type.
pub type SlotIndex = i64;

/// Value stored in a slot.
pub type SlotValue = i64;

/// Token used for snapshot operations in workload files.
pub const SNAPSHOT_TOKEN: &str = "string";

/// A single operation in a thread's stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Read one slot under its shared lock.
    Read(SlotIndex),

    /// Write one slot under its exclusive lock.
    Write(SlotIndex, SlotValue),

    /// Read every slot under a single consistent view.
    Snapshot,
}

impl Operation {
    /// The slot this operation targets, if it targets exactly one.
    pub fn index(&self) -> Option<SlotIndex> {
        match self {
            Operation::Read(index) | Operation::Write(index, _) => Some(*index),
            Operation::Snapshot => None,
        }
    }
}

/// Formats the operation in the workload file syntax (`read 1`, `write 0 5`, `string`).
impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read(index) => write!(f, "read {}", index),
            Operation::Write(index, value) => write!(f, "write {} {}", index, value),
            Operation::Snapshot => f.write_str(SNAPSHOT_TOKEN),
        }
    }
}
