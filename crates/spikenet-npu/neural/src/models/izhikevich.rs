// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Izhikevich Neuron Model
//!
//! Quadratic integrate-and-fire with a recovery variable, advanced with a unit
//! time step.
//!
//! ## Model Dynamics
//!
//! ```text
//! dV = 0.04 × V² + 5 × V + 140 − u + I
//! du = a × (b × V − u)
//!
//! V' = V + dV
//! u' = u + du
//!
//! Reset:
//!     if V' ≥ 30:
//!         V' = c
//!         u' = u' + d
//!
//! Clamp (applied by the caller after reset):
//!     V' = clamp(V', V_min, V_max)
//! ```
//!
//! Both increments use the pre-update `V` and `u`.

use super::traits::{ModelParameters, NeuronModel, NeuronUpdate};

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Potential at which the reset branch is taken (mV)
pub const SPIKE_CUTOFF_MV: f64 = 30.0;

/// Per-neuron Izhikevich parameters
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct IzhikevichParameters {
    /// Time scale of the recovery variable (sensitivity to recovery coupling)
    pub a: f64,
    /// Recovery gain: sensitivity of `u` to sub-threshold `V`
    pub b: f64,
    /// After-spike reset potential
    pub c: f64,
    /// After-spike recovery increment
    pub d: f64,
}

impl IzhikevichParameters {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Regular spiking cortical neuron
    pub fn regular_spiking() -> Self {
        Self::new(0.02, 0.2, -65.0, 8.0)
    }
}

impl Default for IzhikevichParameters {
    fn default() -> Self {
        Self::regular_spiking()
    }
}

impl ModelParameters for IzhikevichParameters {
    fn validate(&self) -> Result<(), &'static str> {
        if !(self.a.is_finite() && self.b.is_finite() && self.c.is_finite() && self.d.is_finite())
        {
            return Err("Izhikevich: parameters must be finite");
        }
        Ok(())
    }

    fn parameter_count() -> usize {
        4 // a + b + c + d
    }
}

/// Advance one neuron by one step (pure, no clamp)
#[inline(always)]
pub fn izhikevich_step(
    membrane_potential: f64,
    recovery: f64,
    input_current: f64,
    params: &IzhikevichParameters,
    spike_cutoff: f64,
) -> NeuronUpdate {
    let v = membrane_potential;
    let u = recovery;

    let dv = 0.04 * v * v + 5.0 * v + 140.0 - u + input_current;
    let du = params.a * (params.b * v - u);

    let mut next_v = v + dv;
    let mut next_u = u + du;

    let fired = next_v >= spike_cutoff;
    if fired {
        next_v = params.c;
        next_u += params.d;
    }

    NeuronUpdate {
        membrane_potential: next_v,
        recovery: next_u,
        fired,
    }
}

/// Clamp a stored membrane potential into `[min, max]`
#[inline(always)]
pub fn clamp_membrane_potential(membrane_potential: f64, min: f64, max: f64) -> f64 {
    membrane_potential.clamp(min, max)
}

/// Izhikevich model with a configurable spike cutoff
#[derive(Debug, Clone, Copy)]
pub struct IzhikevichModel {
    pub spike_cutoff: f64,
}

impl IzhikevichModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spike_cutoff(spike_cutoff: f64) -> Self {
        Self { spike_cutoff }
    }
}

impl Default for IzhikevichModel {
    fn default() -> Self {
        Self {
            spike_cutoff: SPIKE_CUTOFF_MV,
        }
    }
}

impl NeuronModel for IzhikevichModel {
    type Parameters = IzhikevichParameters;

    fn model_name(&self) -> &'static str {
        "Izhikevich (quadratic integrate-and-fire)"
    }

    #[inline(always)]
    fn update(
        &self,
        membrane_potential: f64,
        recovery: f64,
        input_current: f64,
        params: &IzhikevichParameters,
    ) -> NeuronUpdate {
        izhikevich_step(
            membrane_potential,
            recovery,
            input_current,
            params,
            self.spike_cutoff,
        )
    }

    #[inline(always)]
    fn reset_potential(&self, params: &IzhikevichParameters) -> f64 {
        params.c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> IzhikevichParameters {
        IzhikevichParameters::new(0.02, 0.2, -62.0, 6.0)
    }

    #[test]
    fn test_subthreshold_update() {
        let update = izhikevich_step(-65.0, 0.0, 0.0, &params(), SPIKE_CUTOFF_MV);

        // dV = 169 - 325 + 140 = -16
        assert!((update.membrane_potential - (-81.0)).abs() < 1e-12);
        // du = 0.02 * (0.2 * -65 - 0) = -0.26
        assert!((update.recovery - (-0.26)).abs() < 1e-12);
        assert!(!update.fired);
    }

    #[test]
    fn test_reset_sets_c_and_adds_d() {
        let p = params();
        let update = izhikevich_step(60.0, 1.5, 0.0, &p, SPIKE_CUTOFF_MV);

        let unreset_u = 1.5 + p.a * (p.b * 60.0 - 1.5);
        assert!(update.fired);
        assert_eq!(update.membrane_potential, p.c);
        assert!((update.recovery - (unreset_u + p.d)).abs() < 1e-12);
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        // V = 0, u = 0: dV = 140 + I; pick I so V' lands exactly on the cutoff
        let update = izhikevich_step(0.0, 0.0, -110.0, &params(), SPIKE_CUTOFF_MV);
        assert!(update.fired);

        let update = izhikevich_step(0.0, 0.0, -110.5, &params(), SPIKE_CUTOFF_MV);
        assert!(!update.fired);
        assert!((update.membrane_potential - 29.5).abs() < 1e-12);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp_membrane_potential(-81.0, -80.0, 80.0), -80.0);
        assert_eq!(clamp_membrane_potential(95.0, -80.0, 80.0), 80.0);
        assert_eq!(clamp_membrane_potential(12.5, -80.0, 80.0), 12.5);
    }

    #[test]
    fn test_model_trait_matches_free_function() {
        let model = IzhikevichModel::new();
        let p = params();
        assert_eq!(
            model.update(-50.0, 2.0, 4.0, &p),
            izhikevich_step(-50.0, 2.0, 4.0, &p, SPIKE_CUTOFF_MV)
        );
        assert_eq!(model.reset_potential(&p), p.c);
    }

    #[test]
    fn test_parameters_validation() {
        assert!(params().validate().is_ok());
        assert!(IzhikevichParameters::new(f64::NAN, 0.2, -65.0, 8.0)
            .validate()
            .is_err());
        assert_eq!(IzhikevichParameters::parameter_count(), 4);
    }
}
