// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neural Dynamics
//!
//! Izhikevich update, reset and clamp for every neuron in one pass.
//!
//! The pass writes into scratch buffers and checks every value before the
//! neuron state is replaced. A divergent step leaves the state exactly as it
//! was after the last completed step.

use std::sync::OnceLock;

use spikenet_npu_neural::{
    clamp_membrane_potential, IzhikevichModel, IzhikevichParameters, NeuralError, NeuronId,
    NeuronModel, UniformRange,
};
use tracing::{error, trace};

use crate::error::{SimulationError, SimulationResult};
use crate::neuron_state::NeuronState;

/// Runtime-gated tracing config for neural dynamics.
/// Enable with:
/// - SPIKENET_TRACE_DYNAMICS=1
/// Optional filters:
/// - SPIKENET_TRACE_NEURON=<u32 neuron_id> (single neuron)
struct DynamicsTraceCfg {
    enabled: bool,
    neuron_filter: Option<u32>,
}

fn dynamics_trace_cfg() -> &'static DynamicsTraceCfg {
    static CFG: OnceLock<DynamicsTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        let enabled = std::env::var("SPIKENET_TRACE_DYNAMICS")
            .ok()
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let neuron_filter = std::env::var("SPIKENET_TRACE_NEURON")
            .ok()
            .and_then(|v| v.parse().ok());

        DynamicsTraceCfg {
            enabled,
            neuron_filter,
        }
    })
}

/// Result of one dynamics pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicsResult {
    /// Neurons whose reset branch was taken, ascending
    pub fired_neurons: Vec<NeuronId>,

    /// Performance metrics
    pub neurons_processed: usize,
    pub neurons_fired: usize,
}

/// Applies the single-neuron update to the whole population
#[derive(Debug, Clone)]
pub struct DynamicsEngine {
    model: IzhikevichModel,
    clamp: UniformRange,
    next_potentials: Vec<f64>,
    next_recovery: Vec<f64>,
}

impl DynamicsEngine {
    /// `clamp` bounds the stored membrane potential (inclusive on both ends)
    pub fn new(spike_cutoff: f64, clamp: UniformRange) -> Self {
        Self {
            model: IzhikevichModel::with_spike_cutoff(spike_cutoff),
            clamp,
            next_potentials: Vec::new(),
            next_recovery: Vec::new(),
        }
    }

    pub fn spike_cutoff(&self) -> f64 {
        self.model.spike_cutoff
    }

    pub fn clamp_range(&self) -> UniformRange {
        self.clamp
    }

    /// Advance every neuron one step with `input_current`
    ///
    /// ## Algorithm:
    /// 1. Reject non-finite input current
    /// 2. Izhikevich update from the pre-step `V` and `u`
    /// 3. Reset to `c` and add `d` when `V'` reaches the spike cutoff
    /// 4. Reject non-finite `V'` or `u'`
    /// 5. Clamp `V'` and commit the whole population at once
    pub fn process(
        &mut self,
        state: &mut NeuronState,
        parameters: &[IzhikevichParameters],
        input_current: &[f64],
        step: u64,
    ) -> SimulationResult<DynamicsResult> {
        let n = state.len();
        for len in [parameters.len(), input_current.len()] {
            if len != n {
                return Err(NeuralError::ArraySizeMismatch {
                    expected: n,
                    actual: len,
                }
                .into());
            }
        }

        let trace_cfg = dynamics_trace_cfg();

        self.next_potentials.clear();
        self.next_recovery.clear();
        let mut fired_neurons = Vec::new();

        let potentials = state.membrane_potentials();
        let recovery = state.recovery_variables();

        for i in 0..n {
            let neuron = NeuronId::from(i);
            let current = input_current[i];
            check_finite(step, neuron, "input current", current)?;

            let update = self
                .model
                .update(potentials[i], recovery[i], current, &parameters[i]);
            check_finite(step, neuron, "membrane potential", update.membrane_potential)?;
            check_finite(step, neuron, "recovery variable", update.recovery)?;

            let stored_v =
                clamp_membrane_potential(update.membrane_potential, self.clamp.min, self.clamp.max);

            if trace_cfg.enabled && trace_cfg.neuron_filter.map_or(true, |id| id == neuron.0) {
                trace!(
                    "[DYNAMICS] step={} neuron={} V={:.4} u={:.4} I={:.4} -> V'={:.4} u'={:.4} fired={}",
                    step,
                    neuron.0,
                    potentials[i],
                    recovery[i],
                    current,
                    stored_v,
                    update.recovery,
                    update.fired
                );
            }

            if update.fired {
                fired_neurons.push(neuron);
            }
            self.next_potentials.push(stored_v);
            self.next_recovery.push(update.recovery);
        }

        state.commit(&mut self.next_potentials, &mut self.next_recovery);

        Ok(DynamicsResult {
            neurons_processed: n,
            neurons_fired: fired_neurons.len(),
            fired_neurons,
        })
    }
}

#[inline(always)]
fn check_finite(step: u64, neuron: NeuronId, quantity: &'static str, value: f64) -> SimulationResult<()> {
    if value.is_finite() {
        return Ok(());
    }
    error!(
        "[DYNAMICS] Numeric divergence at step {}: {} of neuron {} is {}",
        step, quantity, neuron.0, value
    );
    Err(SimulationError::NumericDivergence {
        step,
        neuron,
        quantity,
        value,
    })
}
