// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synaptic Algorithms
//!
//! Current injected into successors of a firing neuron.

pub mod contribution;

pub use contribution::{accumulate_propagated_current, compute_propagated_current};
