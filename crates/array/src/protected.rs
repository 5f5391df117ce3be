//! Array with one reader-writer lock per slot.

use crate::store::{slot_position, SlotStore, OUT_OF_RANGE_VALUE};
use crate::Snapshot;
use parking_lot::{RwLock, RwLockReadGuard};
use slotlock_types::{SlotIndex, SlotValue};
use tracing::debug;

/// A fixed-length array where every slot has its own reader-writer lock.
///
/// Each slot value lives inside its lock, so slot `i` can only be reached
/// through lock `i`: shared for reads, exclusive for writes. No lock covers
/// more than one slot. The backing storage is a boxed slice and is never
/// resized, so lock identity is stable for the life of the array.
///
/// # Lock ordering
///
/// [`snapshot`](Self::snapshot) is the only operation that holds more than
/// one lock. It acquires them in strictly ascending index order. `read` and
/// `write` hold a single lock and cannot take part in a circular wait. Any
/// new operation that spans several slots must acquire in the same order.
///
/// # Example
///
/// ```
/// use slotlock_array::ProtectedArray;
///
/// let array = ProtectedArray::new(3);
/// array.write(1, 7);
/// array.write(5, 9); // out of range: ignored
///
/// assert_eq!(array.read(1), 7);
/// assert_eq!(array.read(-1), 0);
/// assert_eq!(array.snapshot().values(), &[0, 7, 0]);
/// ```
#[derive(Debug)]
pub struct ProtectedArray {
    slots: Box<[RwLock<SlotValue>]>,
}

impl ProtectedArray {
    /// Create an array of `len` slots, all zero.
    pub fn new(len: usize) -> Self {
        Self::from_values(vec![0; len])
    }

    /// Create an array holding the given initial values.
    pub fn from_values(values: Vec<SlotValue>) -> Self {
        debug!(slots = values.len(), "Creating per-slot locked array");
        Self {
            slots: values.into_iter().map(RwLock::new).collect(),
        }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the array has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store `value` in slot `index` under its exclusive lock.
    ///
    /// Indices outside `[0, len)` are ignored.
    pub fn write(&self, index: SlotIndex, value: SlotValue) {
        if let Some(slot) = self.slot(index) {
            *slot.write() = value;
        }
    }

    /// Read slot `index` under its shared lock.
    ///
    /// Indices outside `[0, len)` return [`OUT_OF_RANGE_VALUE`] without locking.
    pub fn read(&self, index: SlotIndex) -> SlotValue {
        match self.slot(index) {
            Some(slot) => *slot.read(),
            None => OUT_OF_RANGE_VALUE,
        }
    }

    /// Read every slot while holding all of their shared locks at once.
    ///
    /// Writers on any slot are held off until every value has been copied out,
    /// so the result reflects a single instant. Other readers and snapshots
    /// are not blocked.
    pub fn snapshot(&self) -> Snapshot {
        // Ascending index order. Must match every other multi-slot acquisition.
        let guards: Vec<RwLockReadGuard<'_, SlotValue>> =
            self.slots.iter().map(|slot| slot.read()).collect();

        let values = guards.iter().map(|guard| **guard).collect();
        drop(guards);

        Snapshot::new(values)
    }

    fn slot(&self, index: SlotIndex) -> Option<&RwLock<SlotValue>> {
        slot_position(index, self.slots.len()).map(|position| &self.slots[position])
    }
}

impl SlotStore for ProtectedArray {
    fn len(&self) -> usize {
        ProtectedArray::len(self)
    }

    fn read(&self, index: SlotIndex) -> SlotValue {
        ProtectedArray::read(self, index)
    }

    fn write(&self, index: SlotIndex, value: SlotValue) {
        ProtectedArray::write(self, index, value)
    }

    fn snapshot(&self) -> Snapshot {
        ProtectedArray::snapshot(self)
    }
}
