// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for neural computation

use super::ids::NeuronId;

/// Errors raised by the pure neural layer
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid range {name}: [{min}, {max}]")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Array size mismatch: expected {expected}, got {actual}")]
    ArraySizeMismatch { expected: usize, actual: usize },

    #[error("Neuron not found: {0}")]
    NeuronNotFound(NeuronId),
}

pub type Result<T> = core::result::Result<T, NeuralError>;
pub type Error = NeuralError;
