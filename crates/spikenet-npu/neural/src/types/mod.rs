// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Neural Types Module
//!
//! Core type definitions shared by every spikenet crate.

pub mod connectome;
pub mod error;
pub mod ids;
pub mod range;

// Re-export commonly used types
pub use connectome::{Connectome, EdgeWeights};
pub use error::{Error, NeuralError, Result};
pub use ids::NeuronId;
pub use range::UniformRange;
