// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Closed-open value ranges used for every randomized quantity
//!
//! A range `[min, max)` is well formed when both bounds are finite,
//! `min <= max` and the width `max - min` is finite. `min == max` is a degenerate range that always yields `min`.

use super::error::{NeuralError, Result};

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Uniform sampling interval `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Range that always yields `value`
    pub const fn constant(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Check bounds, naming the offending quantity in the error
    pub fn validate(&self, name: &'static str) -> Result<()> {
        if !self.min.is_finite()
            || !self.max.is_finite()
            || self.min > self.max
            || !self.width().is_finite()
        {
            return Err(NeuralError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Whether `value` is a possible draw from this range
    pub fn contains(&self, value: f64) -> bool {
        if self.is_degenerate() {
            value == self.min
        } else {
            value >= self.min && value < self.max
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}
