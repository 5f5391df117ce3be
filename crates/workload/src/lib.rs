//! Workload generation and operation stream files.
//!
//! - **Shapes**: the named operation mixes the benchmark compares
//!   ([`WorkloadShape`])
//! - **Model**: weighted sampling of operation templates ([`WorkloadModel`])
//! - **Files**: one operation per line, read back with a forgiving token
//!   scanner ([`write_operations`], [`load_operations`])
//!
//! # Example
//!
//! ```
//! use slotlock_workload::{WorkloadGenerator, WorkloadModel, WorkloadShape};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let model = WorkloadModel::from_shape(WorkloadShape::Skewed).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let ops = model.generate_batch(&mut rng, 1_000);
//! assert_eq!(ops.len(), 1_000);
//! ```

mod error;
mod loader;
mod model;
mod shape;
mod writer;

pub use error::WorkloadError;
pub use loader::{load_operations, load_streams, parse_operations, ParsedOperations};
pub use model::{WeightedOperation, WorkloadGenerator, WorkloadModel};
pub use shape::WorkloadShape;
pub use writer::{generate_files, stream_path, write_operations};
