// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity types for neurons

use core::fmt;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Neuron ID (index into every per-neuron array, `0..N`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct NeuronId(pub u32);

impl NeuronId {
    /// Array index of this neuron
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for NeuronId {
    fn from(index: usize) -> Self {
        NeuronId(index as u32)
    }
}

impl fmt::Display for NeuronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Neuron({})", self.0)
    }
}
