// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Neuron model traits

/// Parameters owned by a single neuron for a given model
pub trait ModelParameters: Copy {
    /// Check that the parameters can be simulated
    fn validate(&self) -> Result<(), &'static str>;

    /// Number of scalar parameters per neuron
    fn parameter_count() -> usize;
}

/// Result of one single-neuron update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronUpdate {
    /// Membrane potential after the update and any reset (before clamping)
    pub membrane_potential: f64,
    /// Recovery variable after the update and any reset increment
    pub recovery: f64,
    /// Whether the reset branch was taken
    pub fired: bool,
}

/// Single-neuron dynamics
///
/// Implementations must be pure: the same inputs always give the same update.
pub trait NeuronModel {
    type Parameters: ModelParameters;

    fn model_name(&self) -> &'static str;

    /// Advance one neuron by one step given its input current
    fn update(
        &self,
        membrane_potential: f64,
        recovery: f64,
        input_current: f64,
        params: &Self::Parameters,
    ) -> NeuronUpdate;

    /// Potential the neuron is reset to after a spike
    fn reset_potential(&self, params: &Self::Parameters) -> f64;
}
