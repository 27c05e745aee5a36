// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for brain development operations.
*/

use spikenet_npu_neural::NeuralError;

/// Result type for BDU operations
pub type BduResult<T> = Result<T, BduError>;

/// Errors that can occur during network setup
#[derive(Debug, thiserror::Error)]
pub enum BduError {
    #[error("Cannot wire {node_count} neurons with out-degree {out_degree}: {reason}")]
    GraphConstruction {
        node_count: usize,
        out_degree: usize,
        reason: String,
    },

    #[error("Invalid range {name}: [{min}, {max})")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<NeuralError> for BduError {
    fn from(err: NeuralError) -> Self {
        match err {
            NeuralError::InvalidRange { name, min, max } => BduError::InvalidRange { name, min, max },
            other => BduError::Internal(other.to_string()),
        }
    }
}
