//! Weighted sampling of operation templates.

use crate::{WorkloadError, WorkloadShape};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use slotlock_types::Operation;
use tracing::debug;

/// An operation template and its relative weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedOperation {
    /// The concrete operation emitted when this template is drawn.
    pub operation: Operation,
    /// Relative weight; zero means never drawn.
    pub weight: u32,
}

impl WeightedOperation {
    /// Create a new weighted template.
    pub fn new(operation: Operation, weight: u32) -> Self {
        Self { operation, weight }
    }
}

/// Trait for producing operation streams.
pub trait WorkloadGenerator {
    /// Draw a single operation.
    fn generate_one(&self, rng: &mut impl rand::Rng) -> Operation;

    /// Draw `count` independent operations.
    fn generate_batch(&self, rng: &mut impl rand::Rng, count: usize) -> Vec<Operation> {
        (0..count).map(|_| self.generate_one(rng)).collect()
    }
}

/// A weighted set of templates, sampled independently per operation.
#[derive(Debug, Clone)]
pub struct WorkloadModel {
    templates: Vec<WeightedOperation>,
    distribution: WeightedIndex<u32>,
}

impl WorkloadModel {
    /// Build a model from templates.
    ///
    /// Fails if there are no templates or every weight is zero.
    pub fn new(templates: Vec<WeightedOperation>) -> Result<Self, WorkloadError> {
        if templates.is_empty() {
            return Err(WorkloadError::EmptyShape);
        }

        let distribution = WeightedIndex::new(templates.iter().map(|t| t.weight))
            .map_err(|e| WorkloadError::InvalidWeights(e.to_string()))?;

        Ok(Self {
            templates,
            distribution,
        })
    }

    /// Build the model for a named shape.
    pub fn from_shape(shape: WorkloadShape) -> Result<Self, WorkloadError> {
        Self::new(shape.templates())
    }

    /// Generate one stream per thread, `count` operations each.
    ///
    /// Thread `t` draws from its own RNG seeded with `seed + t`, so streams
    /// are independent of each other and reproducible for a given seed.
    pub fn generate_streams(&self, threads: usize, count: usize, seed: u64) -> Vec<Vec<Operation>> {
        debug!(threads, count, seed, "Generating operation streams");

        (0..threads)
            .map(|thread| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(thread as u64));
                self.generate_batch(&mut rng, count)
            })
            .collect()
    }
}

impl WorkloadGenerator for WorkloadModel {
    fn generate_one(&self, rng: &mut impl rand::Rng) -> Operation {
        self.templates[self.distribution.sample(rng)].operation
    }
}
