// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Mutable per-neuron state (structure of arrays)

use spikenet_npu_neural::{NeuralError, NeuronId, Result};

/// Membrane potential `V` and recovery variable `u` for every neuron
///
/// Both arrays always have one entry per neuron. Only the dynamics engine
/// replaces them, and only with a fully validated step.
#[derive(Debug, Clone, PartialEq)]
pub struct NeuronState {
    membrane_potentials: Vec<f64>,
    recovery_variables: Vec<f64>,
}

impl NeuronState {
    /// Every neuron at `baseline_potential`, recovery zero
    pub fn new(node_count: usize, baseline_potential: f64) -> Self {
        Self {
            membrane_potentials: vec![baseline_potential; node_count],
            recovery_variables: vec![0.0; node_count],
        }
    }

    /// Baseline everywhere except `seed_neuron`, which starts at `seed_potential`
    pub fn with_seed(
        node_count: usize,
        baseline_potential: f64,
        seed_neuron: NeuronId,
        seed_potential: f64,
    ) -> Result<Self> {
        if seed_neuron.index() >= node_count {
            return Err(NeuralError::NeuronNotFound(seed_neuron));
        }
        let mut state = Self::new(node_count, baseline_potential);
        state.membrane_potentials[seed_neuron.index()] = seed_potential;
        Ok(state)
    }

    pub fn from_parts(membrane_potentials: Vec<f64>, recovery_variables: Vec<f64>) -> Result<Self> {
        if membrane_potentials.len() != recovery_variables.len() {
            return Err(NeuralError::ArraySizeMismatch {
                expected: membrane_potentials.len(),
                actual: recovery_variables.len(),
            });
        }
        Ok(Self {
            membrane_potentials,
            recovery_variables,
        })
    }

    pub fn len(&self) -> usize {
        self.membrane_potentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membrane_potentials.is_empty()
    }

    pub fn membrane_potentials(&self) -> &[f64] {
        &self.membrane_potentials
    }

    pub fn recovery_variables(&self) -> &[f64] {
        &self.recovery_variables
    }

    pub fn membrane_potential(&self, neuron: NeuronId) -> Option<f64> {
        self.membrane_potentials.get(neuron.index()).copied()
    }

    pub fn recovery(&self, neuron: NeuronId) -> Option<f64> {
        self.recovery_variables.get(neuron.index()).copied()
    }

    /// Swap in the next step's arrays; the previous arrays are left in the buffers
    pub(crate) fn commit(&mut self, next_v: &mut Vec<f64>, next_u: &mut Vec<f64>) {
        debug_assert_eq!(next_v.len(), self.len());
        debug_assert_eq!(next_u.len(), self.len());
        std::mem::swap(&mut self.membrane_potentials, next_v);
        std::mem::swap(&mut self.recovery_variables, next_u);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_initial_state() {
        let state = NeuronState::with_seed(4, -65.0, NeuronId(2), 60.0).unwrap();
        assert_eq!(state.membrane_potentials(), &[-65.0, -65.0, 60.0, -65.0]);
        assert_eq!(state.recovery_variables(), &[0.0; 4]);
    }

    #[test]
    fn test_seed_neuron_out_of_range() {
        let err = NeuronState::with_seed(3, -65.0, NeuronId(3), 60.0).unwrap_err();
        assert!(matches!(err, NeuralError::NeuronNotFound(NeuronId(3))));
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        assert!(NeuronState::from_parts(vec![0.0; 3], vec![0.0; 2]).is_err());
    }

    #[test]
    fn test_commit_swaps_buffers() {
        let mut state = NeuronState::new(2, -65.0);
        let mut v = vec![1.0, 2.0];
        let mut u = vec![3.0, 4.0];
        state.commit(&mut v, &mut u);
        assert_eq!(state.membrane_potentials(), &[1.0, 2.0]);
        assert_eq!(state.recovery_variables(), &[3.0, 4.0]);
        assert_eq!(v, vec![-65.0, -65.0]);
    }
}
