// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Random sources for network setup.

Every setup routine takes `&mut R where R: Rng` so callers decide where randomness
comes from. `seeded_rng` is the default deterministic source.
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spikenet_npu_neural::UniformRange;

/// Deterministic generator for a given seed
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One draw from `[min, max)`; degenerate ranges return `min` without consuming randomness
///
/// The range must already be validated.
#[inline]
pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R, range: &UniformRange) -> f64 {
    if range.is_degenerate() {
        range.min
    } else {
        rng.gen_range(range.min..range.max)
    }
}
