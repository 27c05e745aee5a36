// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Edge weight assignment.

One independent uniform draw per edge, in edge-index order.
*/

use rand::Rng;
use spikenet_npu_neural::{Connectome, EdgeWeights, UniformRange};
use tracing::debug;

use crate::rng::sample_uniform;
use crate::types::{BduError, BduResult};

/// Assigns each edge a weight drawn from a positive uniform range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightAssigner {
    range: UniformRange,
}

impl WeightAssigner {
    /// Weights must be strictly positive, so `range.min` must be `> 0`
    pub fn new(range: UniformRange) -> BduResult<Self> {
        range.validate("synapse.weight")?;
        if range.min <= 0.0 {
            return Err(BduError::InvalidRange {
                name: "synapse.weight",
                min: range.min,
                max: range.max,
            });
        }
        Ok(Self { range })
    }

    pub fn range(&self) -> UniformRange {
        self.range
    }

    pub fn assign<R: Rng + ?Sized>(&self, connectome: &Connectome, rng: &mut R) -> BduResult<EdgeWeights> {
        let weights: Vec<f64> = (0..connectome.edge_count())
            .map(|_| sample_uniform(rng, &self.range))
            .collect();

        debug!(
            "[SYNAPTOGENESIS] Assigned {} weights in [{}, {})",
            weights.len(),
            self.range.min,
            self.range.max
        );

        Ok(EdgeWeights::new(connectome, weights)?)
    }
}

impl Default for WeightAssigner {
    fn default() -> Self {
        Self {
            range: UniformRange::new(0.8, 1.2),
        }
    }
}

/// One weight per edge from `range`, in edge-index order
pub fn assign_edge_weights<R: Rng + ?Sized>(
    connectome: &Connectome,
    range: UniformRange,
    rng: &mut R,
) -> BduResult<EdgeWeights> {
    WeightAssigner::new(range)?.assign(connectome, rng)
}
