// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Fixed out-degree random wiring.

Every neuron receives exactly `out_degree` distinct successors drawn uniformly
from all other neurons. Sources are visited in index order, so the edge order
(and therefore the edge index each weight is keyed by) is fully determined by
the random stream.
*/

use rand::seq::index;
use rand::Rng;
use spikenet_npu_neural::{Connectome, NeuronId};
use tracing::debug;

use crate::types::{BduError, BduResult};

/// Builds a random directed graph with fixed out-degree and no self-loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphBuilder {
    node_count: usize,
    out_degree: usize,
}

impl GraphBuilder {
    /// Validates the shape; `out_degree` must be strictly less than `node_count`
    pub fn new(node_count: usize, out_degree: usize) -> BduResult<Self> {
        if node_count == 0 {
            return Err(BduError::GraphConstruction {
                node_count,
                out_degree,
                reason: "network must contain at least one neuron".to_string(),
            });
        }
        if node_count > u32::MAX as usize {
            return Err(BduError::GraphConstruction {
                node_count,
                out_degree,
                reason: format!("neuron ids are 32-bit, at most {} neurons", u32::MAX),
            });
        }
        if out_degree >= node_count {
            return Err(BduError::GraphConstruction {
                node_count,
                out_degree,
                reason: format!(
                    "out-degree must be below the neuron count (at most {} other neurons available)",
                    node_count - 1
                ),
            });
        }
        Ok(Self {
            node_count,
            out_degree,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn out_degree(&self) -> usize {
        self.out_degree
    }

    /// Draw the graph from `rng`
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> BduResult<Connectome> {
        let mut adjacency = Vec::with_capacity(self.node_count);

        for source in 0..self.node_count {
            // Sample from the other N-1 neurons, then shift past the source to skip it
            let picks = index::sample(rng, self.node_count - 1, self.out_degree);
            let successors: Vec<NeuronId> = picks
                .into_iter()
                .map(|i| if i >= source { i + 1 } else { i })
                .map(NeuronId::from)
                .collect();
            adjacency.push(successors);
        }

        let connectome = Connectome::from_adjacency(adjacency).map_err(|e| {
            BduError::GraphConstruction {
                node_count: self.node_count,
                out_degree: self.out_degree,
                reason: e.to_string(),
            }
        })?;

        debug!(
            "[SYNAPTOGENESIS] Wired {} neurons, {} edges (out-degree {})",
            connectome.node_count(),
            connectome.edge_count(),
            self.out_degree
        );

        Ok(connectome)
    }
}

/// Wire `node_count` neurons with exactly `out_degree` successors each
pub fn build_fixed_out_degree_graph<R: Rng + ?Sized>(
    node_count: usize,
    out_degree: usize,
    rng: &mut R,
) -> BduResult<Connectome> {
    GraphBuilder::new(node_count, out_degree)?.build(rng)
}
