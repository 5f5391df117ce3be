//! Core types for the slotlock benchmark.
//!
//! Shared between the locked array, the workload tooling and the benchmark
//! runner. Kept dependency-free so every other crate can pull it in.

mod operation;

pub use operation::{Operation, SlotIndex, SlotValue, SNAPSHOT_TOKEN};
