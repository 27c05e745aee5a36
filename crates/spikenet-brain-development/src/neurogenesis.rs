// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Per-neuron parameter sampling.

Parameters are drawn column by column: every `a`, then every `b`, then every
`c`, then every `d`. Changing that order changes which values a seed produces.
*/

use rand::Rng;
use spikenet_npu_neural::{IzhikevichParameters, UniformRange};
use tracing::debug;

use crate::rng::sample_uniform;
use crate::types::BduResult;

/// Sampling ranges for the four Izhikevich parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeuronParameterRanges {
    pub a: UniformRange,
    pub b: UniformRange,
    pub c: UniformRange,
    pub d: UniformRange,
}

impl NeuronParameterRanges {
    pub fn validate(&self) -> BduResult<()> {
        self.a.validate("neuron.a")?;
        self.b.validate("neuron.b")?;
        self.c.validate("neuron.c")?;
        self.d.validate("neuron.d")?;
        Ok(())
    }
}

impl Default for NeuronParameterRanges {
    fn default() -> Self {
        Self {
            a: UniformRange::new(0.01, 0.03),
            b: UniformRange::new(0.1, 0.3),
            c: UniformRange::new(-68.0, -58.0),
            d: UniformRange::new(2.0, 10.0),
        }
    }
}

/// Draws independent Izhikevich parameters for every neuron
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParameterSampler {
    ranges: NeuronParameterRanges,
}

impl ParameterSampler {
    pub fn new(ranges: NeuronParameterRanges) -> BduResult<Self> {
        ranges.validate()?;
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &NeuronParameterRanges {
        &self.ranges
    }

    pub fn sample<R: Rng + ?Sized>(&self, node_count: usize, rng: &mut R) -> Vec<IzhikevichParameters> {
        let mut column = |range: &UniformRange| -> Vec<f64> {
            (0..node_count).map(|_| sample_uniform(rng, range)).collect()
        };
        let a = column(&self.ranges.a);
        let b = column(&self.ranges.b);
        let c = column(&self.ranges.c);
        let d = column(&self.ranges.d);

        debug!(
            "[NEUROGENESIS] Sampled parameters for {} neurons",
            node_count
        );

        (0..node_count)
            .map(|i| IzhikevichParameters::new(a[i], b[i], c[i], d[i]))
            .collect()
    }
}

/// Sample parameters for `node_count` neurons from `ranges`
pub fn sample_neuron_parameters<R: Rng + ?Sized>(
    node_count: usize,
    ranges: &NeuronParameterRanges,
    rng: &mut R,
) -> BduResult<Vec<IzhikevichParameters>> {
    Ok(ParameterSampler::new(*ranges)?.sample(node_count, rng))
}
