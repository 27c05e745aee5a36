// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Read-only view of the simulation for renderers and recorders
//!
//! The simulator calls `on_topology` once per run, then `on_step` after every
//! committed step. Observers only ever see shared borrows.

use spikenet_npu_neural::{Connectome, EdgeWeights, NeuronId};

/// Static network structure
#[derive(Debug, Clone, Copy)]
pub struct NetworkTopology<'a> {
    pub connectome: &'a Connectome,
    pub weights: &'a EdgeWeights,
}

impl<'a> NetworkTopology<'a> {
    pub fn node_count(&self) -> usize {
        self.connectome.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.connectome.edge_count()
    }

    /// `(source, target, weight)` in edge-index order
    pub fn weighted_edges(&self) -> impl Iterator<Item = (NeuronId, NeuronId, f64)> + 'a {
        let connectome: &'a Connectome = self.connectome;
        let weights: &'a EdgeWeights = self.weights;
        connectome
            .edges()
            .map(move |(edge, source, target)| (source, target, weights.weight(edge)))
    }
}

/// State after one committed step
#[derive(Debug, Clone, Copy)]
pub struct StepFrame<'a> {
    /// 1-based step number; 0 is the initial state
    pub step: u64,
    pub membrane_potentials: &'a [f64],
    pub recovery_variables: &'a [f64],
    /// Input current that produced this state
    pub input_current: &'a [f64],
    /// Neurons reset during this step
    pub fired: &'a [NeuronId],
}

/// Receives simulation output
///
/// Returning `Err` aborts the run and marks it failed.
pub trait StateObserver {
    fn on_topology(&mut self, topology: &NetworkTopology<'_>) -> Result<(), String> {
        let _ = topology;
        Ok(())
    }

    fn on_step(&mut self, frame: &StepFrame<'_>) -> Result<(), String>;
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl StateObserver for NullObserver {
    fn on_step(&mut self, _frame: &StepFrame<'_>) -> Result<(), String> {
        Ok(())
    }
}
