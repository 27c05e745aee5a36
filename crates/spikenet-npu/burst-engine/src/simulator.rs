// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Simulator
//!
//! Owns the network and drives the step loop:
//!
//! ```text
//! Ready ──step──▶ Running ──(last step)──▶ Done
//!   │                │
//!   └────────────────┴──(divergence / observer error)──▶ Failed
//! ```
//!
//! A simulator only exists once setup has succeeded, so construction either
//! yields a `Ready` simulator or an error. Each step reads the settled previous
//! state (propagation), then replaces it (dynamics), then the new state is
//! available to observers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::Rng;
use spikenet_brain_development::{
    seeded_rng, GraphBuilder, NeuronParameterRanges, ParameterSampler, WeightAssigner,
};
use spikenet_config::{validate_config, SpikenetConfig, ValueRange};
use spikenet_npu_neural::{
    Connectome, EdgeWeights, IzhikevichParameters, ModelParameters, NeuronId, UniformRange,
};
use tracing::{debug, error, info, warn};

use crate::error::{SimulationError, SimulationResult};
use crate::neural_dynamics::DynamicsEngine;
use crate::neuron_state::NeuronState;
use crate::observer::{NetworkTopology, StateObserver, StepFrame};
use crate::synaptic_propagation::PropagationEngine;
use crate::SimulationStats;

/// Steps slower than this are logged as warnings
const SLOW_STEP_WARN_MS: u128 = 10;

/// Lifecycle of a simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Network built, no step taken
    Ready,
    /// At least one step taken, steps remain
    Running,
    /// All configured steps completed
    Done,
    /// A step or observer failed; the state is kept at the last completed step
    Failed,
}

/// Validated, typed view of `SpikenetConfig`
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub node_count: usize,
    pub out_degree: usize,
    pub steps: u64,
    pub seed: u64,
    pub neuron_ranges: NeuronParameterRanges,
    pub weight_range: UniformRange,
    pub firing_threshold: f64,
    pub noise: UniformRange,
    pub spike_cutoff: f64,
    pub clamp: UniformRange,
    pub baseline_potential: f64,
    pub seed_neuron: usize,
    pub seed_potential: f64,
    pub seed_input_current: f64,
}

impl SimulationParameters {
    pub fn from_config(config: &SpikenetConfig) -> SimulationResult<Self> {
        validate_config(config).map_err(|e| SimulationError::Configuration(e.to_string()))?;

        let range = |r: ValueRange| UniformRange::new(r.min, r.max);
        Ok(Self {
            node_count: config.network.node_count,
            out_degree: config.network.out_degree,
            steps: config.simulation.steps,
            seed: config.simulation.seed,
            neuron_ranges: NeuronParameterRanges {
                a: range(config.neuron.a),
                b: range(config.neuron.b),
                c: range(config.neuron.c),
                d: range(config.neuron.d),
            },
            weight_range: range(config.synapse.weight),
            firing_threshold: config.propagation.firing_threshold,
            noise: range(config.propagation.noise),
            spike_cutoff: config.dynamics.spike_cutoff,
            clamp: range(config.dynamics.clamp),
            baseline_potential: config.stimulus.baseline_potential,
            seed_neuron: config.stimulus.seed_neuron,
            seed_potential: config.stimulus.seed_potential,
            seed_input_current: config.stimulus.seed_input_current,
        })
    }
}

/// Outcome of one step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: u64,
    pub neurons_fired: usize,
    pub propagating_neurons: usize,
    pub contributions: usize,
    pub duration: Duration,
}

/// Outcome of a `run` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps completed during this call
    pub steps_run: u64,
    /// Step the simulator stopped at
    pub final_step: u64,
    pub cancelled: bool,
}

/// Izhikevich network simulator
pub struct Simulator<R: Rng = StdRng> {
    settings: SimulationParameters,
    connectome: Connectome,
    weights: EdgeWeights,
    parameters: Vec<IzhikevichParameters>,
    neuron_state: NeuronState,
    input_current: Vec<f64>,
    next_input_current: Vec<f64>,
    last_fired: Vec<NeuronId>,
    propagation: PropagationEngine,
    dynamics: DynamicsEngine,
    rng: R,
    state: SimulationState,
    current_step: u64,
    stats: SimulationStats,
}

impl Simulator<StdRng> {
    /// Build a simulator whose randomness comes from `simulation.seed`
    pub fn new(config: &SpikenetConfig) -> SimulationResult<Self> {
        let settings = SimulationParameters::from_config(config)?;
        let rng = seeded_rng(settings.seed);
        Self::build(settings, rng)
    }
}

impl<R: Rng> Simulator<R> {
    /// Build a simulator drawing all randomness from `rng`
    ///
    /// Draw order: graph, weights, neuron parameters, then per-step noise.
    pub fn with_rng(config: &SpikenetConfig, rng: R) -> SimulationResult<Self> {
        let settings = SimulationParameters::from_config(config)?;
        Self::build(settings, rng)
    }

    fn build(settings: SimulationParameters, mut rng: R) -> SimulationResult<Self> {
        let setup_start = Instant::now();
        let n = settings.node_count;

        let connectome = GraphBuilder::new(n, settings.out_degree)?.build(&mut rng)?;
        let weights = WeightAssigner::new(settings.weight_range)?.assign(&connectome, &mut rng)?;
        let parameters = ParameterSampler::new(settings.neuron_ranges)?.sample(n, &mut rng);
        for (i, p) in parameters.iter().enumerate() {
            p.validate().map_err(|reason| {
                SimulationError::Configuration(format!("neuron {}: {}", i, reason))
            })?;
        }

        let seed_neuron = NeuronId::from(settings.seed_neuron);
        let neuron_state = NeuronState::with_seed(
            n,
            settings.baseline_potential,
            seed_neuron,
            settings.seed_potential,
        )
        .map_err(|e| SimulationError::Configuration(e.to_string()))?;

        // Reported before the first step; every step recomputes the current from scratch
        let mut input_current = vec![0.0; n];
        input_current[seed_neuron.index()] = settings.seed_input_current;

        info!(
            "[SIMULATOR] Network ready: {} neurons, {} edges, {} steps (setup {:?})",
            n,
            connectome.edge_count(),
            settings.steps,
            setup_start.elapsed()
        );

        Ok(Self {
            propagation: PropagationEngine::new(settings.firing_threshold, settings.noise),
            dynamics: DynamicsEngine::new(settings.spike_cutoff, settings.clamp),
            settings,
            connectome,
            weights,
            parameters,
            neuron_state,
            input_current,
            next_input_current: Vec::with_capacity(n),
            last_fired: Vec::new(),
            rng,
            state: SimulationState::Ready,
            current_step: 0,
            stats: SimulationStats::default(),
        })
    }

    /// Advance exactly one step
    pub fn step(&mut self) -> SimulationResult<StepReport> {
        self.ensure_can_advance()?;

        let step_start = Instant::now();
        let step = self.current_step + 1;

        let propagation = self.propagation.compute_input_current(
            &self.neuron_state,
            &self.parameters,
            &self.connectome,
            &self.weights,
            &mut self.rng,
            &mut self.next_input_current,
        );
        let profile = match propagation {
            Ok(profile) => profile,
            Err(e) => return Err(self.fail(e)),
        };

        let dynamics = match self.dynamics.process(
            &mut self.neuron_state,
            &self.parameters,
            &self.next_input_current,
            step,
        ) {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };

        std::mem::swap(&mut self.input_current, &mut self.next_input_current);
        self.last_fired = dynamics.fired_neurons;
        self.current_step = step;
        self.state = if step >= self.settings.steps {
            SimulationState::Done
        } else {
            SimulationState::Running
        };

        let duration = step_start.elapsed();
        self.stats.total_steps += 1;
        self.stats.total_neurons_fired += dynamics.neurons_fired as u64;
        self.stats.total_contributions += profile.contributions as u64;
        self.stats.total_processing_time_us += duration.as_micros() as u64;

        if duration.as_millis() > SLOW_STEP_WARN_MS {
            warn!(
                "[SIMULATOR] ⚠️ Slow step {}: {:.2}ms ({} neurons)",
                step,
                duration.as_secs_f64() * 1000.0,
                self.neuron_state.len()
            );
        }
        debug!(
            "[SIMULATOR] step {}/{}: {} fired, {} propagating, {} contributions",
            step,
            self.settings.steps,
            dynamics.neurons_fired,
            profile.propagating_neurons,
            profile.contributions
        );

        if self.state == SimulationState::Done {
            info!(
                "[SIMULATOR] Completed {} steps ({} firings, avg {:.1}us/step)",
                step,
                self.stats.total_neurons_fired,
                self.stats.avg_processing_time_us()
            );
        }

        Ok(StepReport {
            step,
            neurons_fired: dynamics.neurons_fired,
            propagating_neurons: profile.propagating_neurons,
            contributions: profile.contributions,
            duration,
        })
    }

    /// Emit the topology, then run every remaining step with `on_step` after each
    pub fn run<O: StateObserver + ?Sized>(&mut self, observer: &mut O) -> SimulationResult<RunSummary> {
        let never = AtomicBool::new(false);
        self.run_with_cancel(observer, &never)
    }

    /// Like `run`, but stops before the next step once `cancel` is set
    ///
    /// A cancelled run keeps its state and can be resumed.
    pub fn run_with_cancel<O: StateObserver + ?Sized>(
        &mut self,
        observer: &mut O,
        cancel: &AtomicBool,
    ) -> SimulationResult<RunSummary> {
        self.ensure_can_advance()?;

        let announced = observer.on_topology(&self.topology());
        if let Err(message) = announced {
            let step = self.current_step;
            return Err(self.fail(SimulationError::Observer { step, message }));
        }

        let start_step = self.current_step;
        let mut cancelled = false;

        while self.state != SimulationState::Done {
            if cancel.load(Ordering::Relaxed) {
                info!("[SIMULATOR] Run cancelled after step {}", self.current_step);
                cancelled = true;
                break;
            }

            self.step()?;

            let observed = observer.on_step(&self.frame());
            if let Err(message) = observed {
                let step = self.current_step;
                return Err(self.fail(SimulationError::Observer { step, message }));
            }
        }

        Ok(RunSummary {
            steps_run: self.current_step - start_step,
            final_step: self.current_step,
            cancelled,
        })
    }

    fn ensure_can_advance(&self) -> SimulationResult<()> {
        match self.state {
            SimulationState::Done => Err(SimulationError::Finished {
                total_steps: self.settings.steps,
            }),
            SimulationState::Failed => Err(SimulationError::Corrupted {
                step: self.current_step,
            }),
            SimulationState::Ready | SimulationState::Running => Ok(()),
        }
    }

    fn fail(&mut self, err: SimulationError) -> SimulationError {
        error!("[SIMULATOR] Run failed after step {}: {}", self.current_step, err);
        self.state = SimulationState::Failed;
        err
    }

    /// Snapshot of the current state for rendering
    pub fn frame(&self) -> StepFrame<'_> {
        StepFrame {
            step: self.current_step,
            membrane_potentials: self.neuron_state.membrane_potentials(),
            recovery_variables: self.neuron_state.recovery_variables(),
            input_current: &self.input_current,
            fired: &self.last_fired,
        }
    }

    pub fn topology(&self) -> NetworkTopology<'_> {
        NetworkTopology {
            connectome: &self.connectome,
            weights: &self.weights,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn neuron_state(&self) -> &NeuronState {
        &self.neuron_state
    }

    /// Input current of the last completed step (the seed boost before step 1)
    pub fn last_input_current(&self) -> &[f64] {
        &self.input_current
    }

    pub fn connectome(&self) -> &Connectome {
        &self.connectome
    }

    pub fn edge_weights(&self) -> &EdgeWeights {
        &self.weights
    }

    pub fn parameters(&self) -> &[IzhikevichParameters] {
        &self.parameters
    }

    pub fn settings(&self) -> &SimulationParameters {
        &self.settings
    }

    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn total_steps(&self) -> u64 {
        self.settings.steps
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    fn small_config(steps: u64) -> SpikenetConfig {
        let mut config = SpikenetConfig::default();
        config.network.node_count = 10;
        config.network.out_degree = 2;
        config.simulation.steps = steps;
        config
    }

    #[test]
    fn test_new_simulator_is_ready() {
        let sim = Simulator::new(&small_config(5)).unwrap();
        assert_eq!(sim.state(), SimulationState::Ready);
        assert_eq!(sim.current_step(), 0);
        assert_eq!(sim.last_input_current()[0], 150.0);
        assert_eq!(sim.neuron_state().membrane_potentials()[0], 60.0);
        assert_eq!(sim.neuron_state().membrane_potentials()[1], -65.0);
    }

    #[test]
    fn test_state_transitions() {
        let mut sim = Simulator::new(&small_config(2)).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.state(), SimulationState::Running);
        sim.step().unwrap();
        assert_eq!(sim.state(), SimulationState::Done);

        let err = sim.step().unwrap_err();
        assert!(matches!(err, SimulationError::Finished { total_steps: 2 }));
        assert_eq!(sim.current_step(), 2);
    }

    #[test]
    fn test_run_completes_and_counts_stats() {
        let mut sim = Simulator::new(&small_config(20)).unwrap();
        let summary = sim.run(&mut NullObserver).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                steps_run: 20,
                final_step: 20,
                cancelled: false
            }
        );
        assert_eq!(sim.stats().total_steps, 20);
        assert_eq!(sim.state(), SimulationState::Done);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config(5);
        config.network.out_degree = 10;
        assert!(matches!(
            Simulator::new(&config),
            Err(SimulationError::Configuration(_))
        ));
    }
}
