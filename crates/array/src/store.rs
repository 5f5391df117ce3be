//! The slot store abstraction shared by every locking strategy.

use crate::Snapshot;
use slotlock_types::{SlotIndex, SlotValue};

/// Value returned by a read of an index outside the array.
pub const OUT_OF_RANGE_VALUE: SlotValue = 0;

/// A fixed-length array of integer slots that many threads read and write.
///
/// Implementations decide how slots are protected, but all of them share the
/// same observable contract:
///
/// - **Fixed length**: `len()` never changes after construction
/// - **Silent bounds**: indices outside `[0, len)` are no-ops for `write` and
///   return [`OUT_OF_RANGE_VALUE`] for `read`, without taking any lock
/// - **Consistent snapshots**: `snapshot()` returns the value of every slot
///   as of a single instant, never a mix of before/after a write
/// - **Blocking**: every call blocks the calling thread until its locks are
///   available; there are no timeouts
pub trait SlotStore: Send + Sync {
    /// Number of slots.
    fn len(&self) -> usize;

    /// Whether the store has no slots at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` addresses a slot in this store.
    fn contains(&self, index: SlotIndex) -> bool {
        slot_position(index, self.len()).is_some()
    }

    /// Read one slot.
    fn read(&self, index: SlotIndex) -> SlotValue;

    /// Overwrite one slot.
    fn write(&self, index: SlotIndex, value: SlotValue);

    /// Read every slot under one consistent view, in index order.
    fn snapshot(&self) -> Snapshot;
}

/// Convert a signed slot index into a position in a store of `len` slots.
///
/// Returns `None` for negative indices and indices `>= len`.
pub fn slot_position(index: SlotIndex, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&position| position < len)
}
