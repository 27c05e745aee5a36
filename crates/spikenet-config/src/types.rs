// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `spikenet.toml`. Every section falls back to its defaults, which reproduce
//! the reference network: 200 neurons, out-degree 3, 200 steps, seed 42.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpikenetConfig {
    pub network: NetworkConfig,
    pub simulation: SimulationConfig,
    pub neuron: NeuronConfig,
    pub synapse: SynapseConfig,
    pub propagation: PropagationConfig,
    pub dynamics: DynamicsConfig,
    pub stimulus: StimulusConfig,
    pub logging: LoggingConfig,
}

/// Closed-open interval `[min, max)` for a uniformly drawn quantity
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds finite and `min <= max`
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min <= self.max
            && (self.max - self.min).is_finite()
    }
}

/// Graph shape
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Number of neurons (N)
    pub node_count: usize,
    /// Outgoing edges per neuron (k), must be < N
    pub out_degree: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            node_count: 200,
            out_degree: 3,
        }
    }
}

/// Run length and randomness
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of time steps (T)
    pub steps: u64,
    /// Seed for graph, weights, parameters and noise
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 200,
            seed: 42,
        }
    }
}

/// Per-neuron Izhikevich parameter ranges
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NeuronConfig {
    pub a: ValueRange,
    pub b: ValueRange,
    pub c: ValueRange,
    pub d: ValueRange,
}

impl Default for NeuronConfig {
    fn default() -> Self {
        Self {
            a: ValueRange::new(0.01, 0.03),
            b: ValueRange::new(0.1, 0.3),
            c: ValueRange::new(-68.0, -58.0),
            d: ValueRange::new(2.0, 10.0),
        }
    }
}

/// Static edge weights
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SynapseConfig {
    /// Weight range, must be positive
    pub weight: ValueRange,
}

impl Default for SynapseConfig {
    fn default() -> Self {
        Self {
            weight: ValueRange::new(0.8, 1.2),
        }
    }
}

/// Spike-triggered current and noise
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PropagationConfig {
    /// A neuron propagates when its potential is strictly above this value
    pub firing_threshold: f64,
    /// Per-neuron, per-step additive noise
    pub noise: ValueRange,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            firing_threshold: 0.0,
            noise: ValueRange::new(-0.5, 0.5),
        }
    }
}

/// Single-neuron update limits
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DynamicsConfig {
    /// Updated potential at or above which the neuron resets
    pub spike_cutoff: f64,
    /// Stored potential is clamped into `[clamp.min, clamp.max]`
    pub clamp: ValueRange,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            spike_cutoff: 30.0,
            clamp: ValueRange::new(-80.0, 80.0),
        }
    }
}

/// Initial state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StimulusConfig {
    /// Starting potential of every neuron except the seed neuron
    pub baseline_potential: f64,
    /// Index of the neuron that starts above threshold
    pub seed_neuron: usize,
    /// Starting potential of the seed neuron
    pub seed_potential: f64,
    /// Input current reported for the seed neuron before the first step
    pub seed_input_current: f64,
}

impl Default for StimulusConfig {
    fn default() -> Self {
        Self {
            baseline_potential: -65.0,
            seed_neuron: 0,
            seed_potential: 60.0,
            seed_input_current: 150.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or EnvFilter directive (trace, debug, info, warn, error)
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
