// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # spikenet
//!
//! Izhikevich spiking-neuron networks over fixed out-degree random graphs.
//!
//! A seeded setup wires `N` neurons with exactly `k` outgoing edges each,
//! draws one weight per edge and four parameters per neuron, then advances
//! the whole population in synchronous steps: propagated current from every
//! neuron above 0 mV, plus noise, then the Izhikevich update with reset and
//! clamp.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spikenet::prelude::*;
//!
//! let config = SpikenetConfig::default(); // 200 neurons, k = 3, 200 steps, seed 42
//! let mut sim = Simulator::new(&config)?;
//! sim.run(&mut NullObserver)?;
//! assert_eq!(sim.state(), SimulationState::Done);
//! # Ok::<(), spikenet::burst_engine::SimulationError>(())
//! ```
//!
//! ## Crates
//! - [`config`]: `spikenet.toml` loading, overrides, validation
//! - [`observability`]: tracing-subscriber setup, per-crate debug flags
//! - [`neural`]: Izhikevich model, propagated-current formula, connectome types
//! - [`bdu`]: graph wiring, edge weights, parameter sampling
//! - [`burst_engine`]: step engines and the simulator
//!
//! ## Feature Flags
//! - **`file-logging`**: per-run log folders via `tracing-appender`

pub use spikenet_brain_development as bdu;
pub use spikenet_config as config;
pub use spikenet_npu_burst_engine as burst_engine;
pub use spikenet_npu_neural as neural;
pub use spikenet_observability as observability;

pub mod recorder;

pub use recorder::JsonLinesRecorder;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Commonly used items
pub mod prelude {
    pub use crate::recorder::JsonLinesRecorder;

    pub use spikenet_config::{load_config, validate_config, SpikenetConfig};
    pub use spikenet_npu_burst_engine::{
        NetworkTopology, NullObserver, SimulationError, SimulationState, SimulationStats,
        Simulator, StateObserver, StepFrame,
    };
    pub use spikenet_npu_neural::{Connectome, EdgeWeights, IzhikevichParameters, NeuronId};
}
