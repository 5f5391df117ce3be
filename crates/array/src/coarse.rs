//! Array guarded by a single reader-writer lock.

use crate::store::{slot_position, SlotStore, OUT_OF_RANGE_VALUE};
use crate::Snapshot;
use parking_lot::RwLock;
use slotlock_types::{SlotIndex, SlotValue};
use tracing::debug;

/// A fixed-length array behind one lock.
///
/// Every write excludes every other access, regardless of which slot it
/// targets. This is the baseline that [`ProtectedArray`](crate::ProtectedArray)
/// is measured against.
#[derive(Debug)]
pub struct CoarseLockedArray {
    slots: RwLock<Box<[SlotValue]>>,
    len: usize,
}

impl CoarseLockedArray {
    /// Create an array of `len` slots, all zero.
    pub fn new(len: usize) -> Self {
        Self::from_values(vec![0; len])
    }

    /// Create an array holding the given initial values.
    pub fn from_values(values: Vec<SlotValue>) -> Self {
        debug!(slots = values.len(), "Creating coarse locked array");
        let len = values.len();
        Self {
            slots: RwLock::new(values.into_boxed_slice()),
            len,
        }
    }
}

impl SlotStore for CoarseLockedArray {
    fn len(&self) -> usize {
        self.len
    }

    fn read(&self, index: SlotIndex) -> SlotValue {
        match slot_position(index, self.len) {
            Some(position) => self.slots.read()[position],
            None => OUT_OF_RANGE_VALUE,
        }
    }

    fn write(&self, index: SlotIndex, value: SlotValue) {
        if let Some(position) = slot_position(index, self.len) {
            self.slots.write()[position] = value;
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.slots.read().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_per_slot_semantics() {
        let array = CoarseLockedArray::new(3);
        array.write(0, 5);
        array.write(1, 7);
        array.write(3, 1);
        array.write(-1, 1);

        assert_eq!(array.read(0), 5);
        assert_eq!(array.read(3), OUT_OF_RANGE_VALUE);
        assert_eq!(array.snapshot().values(), &[5, 7, 0]);
        assert_eq!(array.len(), 3);
    }
}
