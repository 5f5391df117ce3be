//! Whole-array snapshots.

use slotlock_types::SlotValue;
use std::fmt;

/// The values of every slot, taken under one consistent view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    values: Vec<SlotValue>,
}

impl Snapshot {
    /// Wrap values that were read in index order.
    pub fn new(values: Vec<SlotValue>) -> Self {
        Self { values }
    }

    /// Slot values in index order.
    pub fn values(&self) -> &[SlotValue] {
        &self.values
    }

    /// Consume the snapshot, returning the slot values.
    pub fn into_values(self) -> Vec<SlotValue> {
        self.values
    }

    /// Number of slots captured.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no slots were captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render the values joined by single spaces, e.g. `"5 7 0"`.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Byte length of [`render`](Self::render).
    ///
    /// This is the "cost" the benchmark charges for a snapshot: the values are
    /// formatted into a fresh string on every call.
    pub fn rendered_len(&self) -> usize {
        self.render().len()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, value) in self.values.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_with_spaces() {
        let snapshot = Snapshot::new(vec![5, 7, 0]);
        assert_eq!(snapshot.render(), "5 7 0");
        assert_eq!(snapshot.rendered_len(), 5);
    }

    #[test]
    fn test_render_negative_and_empty() {
        assert_eq!(Snapshot::new(vec![-12, 3]).render(), "-12 3");
        assert_eq!(Snapshot::default().render(), "");
        assert_eq!(Snapshot::default().rendered_len(), 0);
    }

    #[test]
    fn test_accessors() {
        let snapshot = Snapshot::new(vec![1, 2]);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
        assert_eq!(snapshot.into_values(), vec![1, 2]);
    }
}
