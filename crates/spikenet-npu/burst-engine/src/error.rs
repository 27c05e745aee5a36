// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulation error types

use spikenet_brain_development::BduError;
use spikenet_npu_neural::{NeuralError, NeuronId};

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Configuration rejected before any network was built
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Network setup failed
    #[error("Graph construction failed: {0}")]
    GraphConstruction(String),

    /// A value left the finite domain; the run is marked failed
    #[error("Numeric divergence at step {step}: {quantity} of {neuron} is {value}")]
    NumericDivergence {
        step: u64,
        neuron: NeuronId,
        quantity: &'static str,
        value: f64,
    },

    #[error("Simulation already completed all {total_steps} steps")]
    Finished { total_steps: u64 },

    #[error("Simulation failed at step {step} and can no longer advance")]
    Corrupted { step: u64 },

    #[error("Observer rejected step {step}: {message}")]
    Observer { step: u64, message: String },

    #[error(transparent)]
    Neural(#[from] NeuralError),
}

impl From<BduError> for SimulationError {
    fn from(err: BduError) -> Self {
        match err {
            BduError::InvalidRange { .. } => SimulationError::Configuration(err.to_string()),
            other => SimulationError::GraphConstruction(other.to_string()),
        }
    }
}
