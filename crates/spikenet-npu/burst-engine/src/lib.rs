// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Spikenet Burst Engine
//!
//! Step loop for Izhikevich networks.
//!
//! ## Architecture
//! - `synaptic_propagation`: previous state → this step's input current
//! - `neural_dynamics`: input current → next state (update, reset, clamp)
//! - `simulator`: setup, lifecycle, observers, statistics
//!
//! Single-threaded and synchronous. Propagation always reads a fully settled
//! state; dynamics replaces it in one commit.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod neural_dynamics;
pub mod neuron_state;
pub mod observer;
pub mod simulator;
pub mod synaptic_propagation;

pub use error::{SimulationError, SimulationResult};
pub use neural_dynamics::{DynamicsEngine, DynamicsResult};
pub use neuron_state::NeuronState;
pub use observer::{NetworkTopology, NullObserver, StateObserver, StepFrame};
pub use simulator::{
    RunSummary, SimulationParameters, SimulationState, Simulator, StepReport,
};
pub use synaptic_propagation::{PropagationEngine, PropagationProfile};

/// Simulation performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub total_steps: u64,
    pub total_neurons_fired: u64,
    pub total_contributions: u64,
    pub total_processing_time_us: u64,
}

impl SimulationStats {
    /// Get average neurons fired per step
    pub fn avg_neurons_fired_per_step(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.total_neurons_fired as f64 / self.total_steps as f64
        }
    }

    /// Get average processing time per step (microseconds)
    pub fn avg_processing_time_us(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.total_processing_time_us as f64 / self.total_steps as f64
        }
    }

    /// Get average contributions per step
    pub fn avg_contributions_per_step(&self) -> f64 {
        if self.total_steps == 0 {
            0.0
        } else {
            self.total_contributions as f64 / self.total_steps as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_stats() {
        let stats = SimulationStats {
            total_steps: 100,
            total_neurons_fired: 250,
            total_contributions: 750,
            total_processing_time_us: 5000,
        };

        assert_eq!(stats.avg_neurons_fired_per_step(), 2.5);
        assert_eq!(stats.avg_processing_time_us(), 50.0);
        assert_eq!(stats.avg_contributions_per_step(), 7.5);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SimulationStats::default();
        assert_eq!(stats.avg_neurons_fired_per_step(), 0.0);
        assert_eq!(stats.avg_processing_time_us(), 0.0);
    }
}
