// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synaptic Propagation
//!
//! Turns the settled state of the previous step into this step's input current.
//!
//! A neuron propagates when its stored potential is strictly above the firing
//! threshold. Each propagating neuron adds `w × (2V − c)` to every successor.
//! Every neuron then receives one independent noise draw, in index order.

use std::sync::OnceLock;

use rand::Rng;
use spikenet_brain_development::sample_uniform;
use spikenet_npu_neural::{
    accumulate_propagated_current, Connectome, EdgeWeights, IzhikevichParameters, NeuralError,
    NeuronId, UniformRange,
};
use tracing::trace;

use crate::error::SimulationResult;
use crate::neuron_state::NeuronState;

/// Runtime-gated tracing config for propagation.
/// Enable with:
/// - SPIKENET_TRACE_PROPAGATION=1
/// Optional filters:
/// - SPIKENET_TRACE_NEURON=<u32 neuron_id> (only that source)
struct PropagationTraceCfg {
    enabled: bool,
    neuron_filter: Option<u32>,
}

fn propagation_trace_cfg() -> &'static PropagationTraceCfg {
    static CFG: OnceLock<PropagationTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        let enabled = std::env::var("SPIKENET_TRACE_PROPAGATION")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let neuron_filter = std::env::var("SPIKENET_TRACE_NEURON")
            .ok()
            .and_then(|v| v.parse().ok());

        PropagationTraceCfg {
            enabled,
            neuron_filter,
        }
    })
}

/// Work done by one propagation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationProfile {
    /// Neurons above the firing threshold
    pub propagating_neurons: usize,
    /// Edge contributions added
    pub contributions: usize,
}

/// Computes per-step input current
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationEngine {
    firing_threshold: f64,
    noise: UniformRange,
}

impl PropagationEngine {
    pub fn new(firing_threshold: f64, noise: UniformRange) -> Self {
        Self {
            firing_threshold,
            noise,
        }
    }

    pub fn firing_threshold(&self) -> f64 {
        self.firing_threshold
    }

    pub fn noise(&self) -> UniformRange {
        self.noise
    }

    /// Overwrite `input_current` with the current for the next dynamics pass
    ///
    /// Reads `state` only; nothing here mutates neuron state.
    pub fn compute_input_current<R: Rng + ?Sized>(
        &self,
        state: &NeuronState,
        parameters: &[IzhikevichParameters],
        connectome: &Connectome,
        weights: &EdgeWeights,
        rng: &mut R,
        input_current: &mut Vec<f64>,
    ) -> SimulationResult<PropagationProfile> {
        let n = state.len();
        for len in [parameters.len(), connectome.node_count()] {
            if len != n {
                return Err(NeuralError::ArraySizeMismatch {
                    expected: n,
                    actual: len,
                }
                .into());
            }
        }

        input_current.clear();
        input_current.resize(n, 0.0);

        let trace_cfg = propagation_trace_cfg();
        let mut profile = PropagationProfile::default();

        for (i, &v) in state.membrane_potentials().iter().enumerate() {
            if v <= self.firing_threshold {
                continue;
            }
            let source = NeuronId::from(i);
            let reset = parameters[i].c;
            let delivered =
                accumulate_propagated_current(source, v, reset, connectome, weights, input_current);

            if trace_cfg.enabled && trace_cfg.neuron_filter.map_or(true, |id| id == source.0) {
                trace!(
                    "[PROPAGATION] source={} V={:.4} c={:.4} -> {} successors {:?}",
                    source.0,
                    v,
                    reset,
                    delivered,
                    connectome.successors(source)
                );
            }

            profile.propagating_neurons += 1;
            profile.contributions += delivered;
        }

        for current in input_current.iter_mut() {
            *current += sample_uniform(rng, &self.noise);
        }

        Ok(profile)
    }
}
