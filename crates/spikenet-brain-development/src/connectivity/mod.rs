// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Connectivity operations.

Wiring (which neuron projects to which) and edge weight assignment.
*/

pub mod synaptogenesis;
pub mod weights;

pub use synaptogenesis::{build_fixed_out_degree_graph, GraphBuilder};
pub use weights::{assign_edge_weights, WeightAssigner};
