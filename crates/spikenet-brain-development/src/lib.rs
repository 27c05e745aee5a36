// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# Spikenet BDU (Brain Development Utilities)

Randomized network setup, run once before simulation:
- Synaptogenesis (fixed out-degree wiring without self-loops)
- Edge weight assignment
- Neurogenesis (per-neuron Izhikevich parameter sampling)

All routines take an injected `rand::Rng`. With one `StdRng` shared across the
setup in the order graph → weights → parameters, a seed reproduces the whole
network exactly.
*/

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod connectivity;
pub mod neurogenesis;
pub mod rng;
pub mod types;

pub use connectivity::{
    assign_edge_weights, build_fixed_out_degree_graph, GraphBuilder, WeightAssigner,
};
pub use neurogenesis::{sample_neuron_parameters, NeuronParameterRanges, ParameterSampler};
pub use rng::{sample_uniform, seeded_rng};
pub use types::{BduError, BduResult};
