// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! Propagated current calculation
//!
//! Pure functions for computing the current a firing neuron injects into each
//! of its successors.

use crate::types::{Connectome, EdgeWeights, NeuronId};

/// Current delivered over one edge by a firing source
///
/// `contribution = weight × (2 × V_source − c_source)`
///
/// The magnitude depends on how far above rest the source is and on the source's
/// own reset potential `c`. A source reset toward a lower `c` pushes harder. The
/// product is not bounded here; callers clamp `V` but not the current.
///
/// # Example
/// ```
/// use spikenet_npu_neural::synapse::compute_propagated_current;
///
/// // 1.0 × (2 × 20 − (−65)) = 105
/// assert_eq!(compute_propagated_current(1.0, 20.0, -65.0), 105.0);
/// ```
#[inline(always)]
pub fn compute_propagated_current(weight: f64, source_potential: f64, source_reset: f64) -> f64 {
    weight * (2.0 * source_potential - source_reset)
}

/// Add one firing source's contributions into `currents`
///
/// Walks the source's outgoing edges in edge-index order. Returns the number of
/// contributions delivered.
///
/// # Panics
/// If `currents` has fewer slots than the connectome has neurons.
#[inline]
pub fn accumulate_propagated_current(
    source: NeuronId,
    source_potential: f64,
    source_reset: f64,
    connectome: &Connectome,
    weights: &EdgeWeights,
    currents: &mut [f64],
) -> usize {
    debug_assert_eq!(currents.len(), connectome.node_count());

    let Some(edges) = connectome.edge_range(source) else {
        return 0;
    };
    let successors = connectome.successors(source);
    for (edge, &target) in edges.zip(successors) {
        currents[target.index()] +=
            compute_propagated_current(weights.weight(edge), source_potential, source_reset);
    }
    successors.len()
}
