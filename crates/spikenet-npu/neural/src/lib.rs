// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Spikenet Neural Computation
//!
//! Pure neural computation with no randomness and no I/O:
//! - **Types**: neuron ids, value ranges, the fixed out-degree connectome, errors
//! - **Synapse**: propagated-current formula for a firing source
//! - **Models**: the Izhikevich update with reset and clamp
//!
//! Everything here is deterministic. Random setup lives in
//! `spikenet-brain-development`, the step loop in `spikenet-npu-burst-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Core type definitions
pub mod types;

// Synaptic algorithms
pub mod synapse;

// Neuron models
pub mod models;

// Re-export types
pub use types::{
    Connectome, EdgeWeights, Error, NeuralError, NeuronId, Result, UniformRange,
};

// Re-export synapse module
pub use synapse::{accumulate_propagated_current, compute_propagated_current};

// Re-export neuron models
pub use models::{
    clamp_membrane_potential, izhikevich_step, IzhikevichModel, IzhikevichParameters,
    ModelParameters, NeuronModel, NeuronUpdate, SPIKE_CUTOFF_MV,
};
