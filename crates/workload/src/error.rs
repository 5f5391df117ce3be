//! Error types for workload generation and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while building or persisting workloads.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Reading or writing a workload file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template weights cannot form a distribution.
    #[error("Invalid template weights: {0}")]
    InvalidWeights(String),

    /// A model was built with no templates.
    #[error("Workload has no operation templates")]
    EmptyShape,

    /// A shape name did not match any known shape.
    #[error("Unknown workload shape: {0}")]
    UnknownShape(String),
}

impl WorkloadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
