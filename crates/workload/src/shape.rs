//! Named operation mixes.

use crate::model::WeightedOperation;
use crate::WorkloadError;
use slotlock_types::Operation;
use std::fmt;
use std::str::FromStr;

/// The operation mixes the benchmark compares.
///
/// All shapes address slots `0..3` and write the value `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkloadShape {
    /// Mixed shape: slot 1 reads dominate, with steady writes and snapshots.
    Variant,

    /// Every template equally likely.
    Equal,

    /// Heavily read-skewed toward slot 1, with frequent snapshots.
    Skewed,
}

impl WorkloadShape {
    /// Every shape, in report column order.
    pub const ALL: [WorkloadShape; 3] = [
        WorkloadShape::Variant,
        WorkloadShape::Equal,
        WorkloadShape::Skewed,
    ];

    /// Short name, also used as the workload file prefix.
    pub fn name(&self) -> &'static str {
        match self {
            WorkloadShape::Variant => "variant",
            WorkloadShape::Equal => "equal",
            WorkloadShape::Skewed => "skewed",
        }
    }

    /// Column heading used in result tables.
    pub fn label(&self) -> &'static str {
        match self {
            WorkloadShape::Variant => "Variant3",
            WorkloadShape::Equal => "Equal",
            WorkloadShape::Skewed => "Skewed",
        }
    }

    /// Weighted templates for this shape.
    pub fn templates(&self) -> Vec<WeightedOperation> {
        let table: &[(Operation, u32)] = match self {
            WorkloadShape::Variant => &[
                (Operation::Write(0, 1), 10),
                (Operation::Read(0), 10),
                (Operation::Read(1), 50),
                (Operation::Write(1, 1), 10),
                (Operation::Read(2), 5),
                (Operation::Write(2, 1), 5),
                (Operation::Snapshot, 10),
            ],
            WorkloadShape::Equal => &[
                (Operation::Write(0, 1), 1),
                (Operation::Read(0), 1),
                (Operation::Write(1, 1), 1),
                (Operation::Read(1), 1),
                (Operation::Write(2, 1), 1),
                (Operation::Read(2), 1),
                (Operation::Snapshot, 1),
            ],
            WorkloadShape::Skewed => &[
                (Operation::Write(0, 1), 1),
                (Operation::Read(0), 1),
                (Operation::Read(1), 80),
                (Operation::Write(1, 1), 1),
                (Operation::Write(2, 1), 1),
                (Operation::Read(2), 1),
                (Operation::Snapshot, 15),
            ],
        };

        table
            .iter()
            .map(|&(operation, weight)| WeightedOperation::new(operation, weight))
            .collect()
    }
}

impl fmt::Display for WorkloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkloadShape {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "variant" | "variant3" => Ok(WorkloadShape::Variant),
            "equal" | "uniform" => Ok(WorkloadShape::Equal),
            "skewed" => Ok(WorkloadShape::Skewed),
            _ => Err(WorkloadError::UnknownShape(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_weights() {
        let total = |shape: WorkloadShape| -> u32 {
            shape.templates().iter().map(|t| t.weight).sum()
        };
        assert_eq!(total(WorkloadShape::Variant), 100);
        assert_eq!(total(WorkloadShape::Equal), 7);
        assert_eq!(total(WorkloadShape::Skewed), 100);
    }

    #[test]
    fn test_skewed_favors_slot_one_reads() {
        let templates = WorkloadShape::Skewed.templates();
        let heaviest = templates.iter().max_by_key(|t| t.weight).unwrap();
        assert_eq!(heaviest.operation, Operation::Read(1));
    }

    #[test]
    fn test_parse_names() {
        for shape in WorkloadShape::ALL {
            assert_eq!(shape.name().parse::<WorkloadShape>().unwrap(), shape);
        }
        assert_eq!(
            "Variant3".parse::<WorkloadShape>().unwrap(),
            WorkloadShape::Variant
        );
        assert!(matches!(
            "zipf".parse::<WorkloadShape>(),
            Err(WorkloadError::UnknownShape(_))
        ));
    }
}
