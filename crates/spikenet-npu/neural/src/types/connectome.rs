// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 */

//! Connectome types
//!
//! The directed graph is stored compressed by source (CSR): `offsets[i]..offsets[i + 1]`
//! indexes the flat `targets` array for neuron `i`. The position of an edge in that
//! flat array is its edge index, which [`EdgeWeights`] uses as its key. Both types
//! are immutable once built.

use core::ops::Range;

use super::error::{NeuralError, Result};
use super::ids::NeuronId;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Directed graph with per-source successor lists
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Connectome {
    node_count: usize,
    offsets: Vec<usize>,
    targets: Vec<NeuronId>,
}

impl Connectome {
    /// Build from one successor list per neuron
    ///
    /// Rejects self-loops, repeated targets for the same source, and targets outside
    /// `0..adjacency.len()`. Reverse edges and edges from different sources to the same
    /// target are allowed.
    pub fn from_adjacency(adjacency: Vec<Vec<NeuronId>>) -> Result<Self> {
        let node_count = adjacency.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::with_capacity(adjacency.iter().map(Vec::len).sum());
        offsets.push(0);

        for (source, successors) in adjacency.into_iter().enumerate() {
            for (position, &target) in successors.iter().enumerate() {
                if target.index() >= node_count {
                    return Err(NeuralError::NeuronNotFound(target));
                }
                if target.index() == source {
                    return Err(NeuralError::InvalidParameter {
                        name: "connectome",
                        reason: format!("self-loop on neuron {}", source),
                    });
                }
                if successors[..position].contains(&target) {
                    return Err(NeuralError::InvalidParameter {
                        name: "connectome",
                        reason: format!("duplicate edge {} -> {}", source, target.0),
                    });
                }
            }
            targets.extend(successors);
            offsets.push(targets.len());
        }

        Ok(Self {
            node_count,
            offsets,
            targets,
        })
    }

    /// Graph with `node_count` neurons and no edges
    pub fn empty(node_count: usize) -> Self {
        Self {
            node_count,
            offsets: vec![0; node_count + 1],
            targets: Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Outgoing neighbours of `node` (empty for unknown neurons)
    #[inline]
    pub fn successors(&self, node: NeuronId) -> &[NeuronId] {
        match self.edge_range(node) {
            Some(range) => &self.targets[range],
            None => &[],
        }
    }

    /// Edge indices owned by `node`, `None` for unknown neurons
    #[inline]
    pub fn edge_range(&self, node: NeuronId) -> Option<Range<usize>> {
        let idx = node.index();
        if idx >= self.node_count {
            return None;
        }
        Some(self.offsets[idx]..self.offsets[idx + 1])
    }

    pub fn out_degree(&self, node: NeuronId) -> usize {
        self.successors(node).len()
    }

    /// Common out-degree, if every neuron has the same one
    pub fn fixed_out_degree(&self) -> Option<usize> {
        let first = self.out_degree(NeuronId(0));
        (0..self.node_count)
            .all(|i| self.out_degree(NeuronId::from(i)) == first)
            .then_some(first)
    }

    /// Index of the edge `source -> target`
    pub fn edge_index(&self, source: NeuronId, target: NeuronId) -> Option<usize> {
        let range = self.edge_range(source)?;
        self.targets[range.clone()]
            .iter()
            .position(|&t| t == target)
            .map(|offset| range.start + offset)
    }

    pub fn has_edge(&self, source: NeuronId, target: NeuronId) -> bool {
        self.edge_index(source, target).is_some()
    }

    /// All edges as `(edge_index, source, target)`, grouped by source
    pub fn edges(&self) -> impl Iterator<Item = (usize, NeuronId, NeuronId)> + '_ {
        (0..self.node_count).flat_map(move |source| {
            let start = self.offsets[source];
            let end = self.offsets[source + 1];
            (start..end).map(move |edge| (edge, NeuronId::from(source), self.targets[edge]))
        })
    }
}

/// One weight per connectome edge, keyed by edge index
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct EdgeWeights {
    weights: Vec<f64>,
}

impl EdgeWeights {
    pub fn new(connectome: &Connectome, weights: Vec<f64>) -> Result<Self> {
        if weights.len() != connectome.edge_count() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: connectome.edge_count(),
                actual: weights.len(),
            });
        }
        Ok(Self { weights })
    }

    #[inline(always)]
    pub fn weight(&self, edge: usize) -> f64 {
        self.weights[edge]
    }

    /// Weight of `source -> target`; only defined for edges present in the graph
    pub fn get(&self, connectome: &Connectome, source: NeuronId, target: NeuronId) -> Option<f64> {
        connectome
            .edge_index(source, target)
            .map(|edge| self.weights[edge])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<NeuronId> {
        raw.iter().copied().map(NeuronId).collect()
    }

    #[test]
    fn test_from_adjacency_builds_csr() {
        let connectome =
            Connectome::from_adjacency(vec![ids(&[1, 2]), ids(&[0, 2]), ids(&[1, 0])]).unwrap();

        assert_eq!(connectome.node_count(), 3);
        assert_eq!(connectome.edge_count(), 6);
        assert_eq!(connectome.successors(NeuronId(1)), &ids(&[0, 2])[..]);
        assert_eq!(connectome.edge_range(NeuronId(2)), Some(4..6));
        assert_eq!(connectome.fixed_out_degree(), Some(2));
        assert_eq!(connectome.edge_index(NeuronId(2), NeuronId(0)), Some(5));
    }

    #[test]
    fn test_reverse_edges_are_kept() {
        let connectome = Connectome::from_adjacency(vec![ids(&[1]), ids(&[0])]).unwrap();
        assert!(connectome.has_edge(NeuronId(0), NeuronId(1)));
        assert!(connectome.has_edge(NeuronId(1), NeuronId(0)));
    }

    #[test]
    fn test_rejects_self_loop_and_duplicates() {
        assert!(Connectome::from_adjacency(vec![ids(&[0]), ids(&[])]).is_err());
        assert!(Connectome::from_adjacency(vec![ids(&[1, 1]), ids(&[])]).is_err());
        assert!(Connectome::from_adjacency(vec![ids(&[5]), ids(&[])]).is_err());
    }

    #[test]
    fn test_unknown_neuron_has_no_successors() {
        let connectome = Connectome::empty(2);
        assert!(connectome.successors(NeuronId(7)).is_empty());
        assert_eq!(connectome.edge_range(NeuronId(7)), None);
        assert_eq!(connectome.edges().count(), 0);
    }

    #[test]
    fn test_edge_weights_length_must_match() {
        let connectome = Connectome::from_adjacency(vec![ids(&[1]), ids(&[0])]).unwrap();
        assert!(EdgeWeights::new(&connectome, vec![1.0]).is_err());

        let weights = EdgeWeights::new(&connectome, vec![0.9, 1.1]).unwrap();
        assert_eq!(weights.get(&connectome, NeuronId(1), NeuronId(0)), Some(1.1));
        assert_eq!(weights.get(&connectome, NeuronId(0), NeuronId(0)), None);
    }

    #[test]
    fn test_connectome_serializes() {
        let connectome = Connectome::from_adjacency(vec![ids(&[1]), ids(&[0])]).unwrap();
        let json = serde_json::to_string(&connectome).unwrap();
        let restored: Connectome = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, connectome);
    }
}
