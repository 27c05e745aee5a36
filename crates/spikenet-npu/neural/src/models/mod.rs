// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neuron Model Architecture
//!
//! Trait-based neuron models. The dynamics engine drives every neuron through
//! [`NeuronModel::update`]; the propagation formula only needs the reset potential.
//!
//! ## Adding a New Neuron Model
//!
//! 1. Create `src/models/your_model.rs`
//! 2. Implement `NeuronModel` trait
//! 3. Add tests
//! 4. Export in `mod.rs`

pub mod izhikevich;
pub mod traits;

// Re-export core types
pub use izhikevich::{
    clamp_membrane_potential, izhikevich_step, IzhikevichModel, IzhikevichParameters,
    SPIKE_CUTOFF_MV,
};
pub use traits::{ModelParameters, NeuronModel, NeuronUpdate};
