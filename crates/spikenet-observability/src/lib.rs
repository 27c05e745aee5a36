// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # spikenet-observability
//!
//! Logging initialisation shared by every spikenet binary and test harness.
//!
//! Library crates only emit `tracing` events; this crate decides where they go.
//! Per-crate debug flags (`--debug-spikenet-npu-burst-engine`, `SPIKENET_DEBUG`)
//! raise individual crates to `debug` without touching the rest.
//!
//! ## Features
//! - `file-logging`: timestamped per-run log folders with retention (desktop only)

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
#[cfg(feature = "file-logging")]
pub mod file;
pub mod init;

// Re-export commonly used items
pub use cli::*;
pub use config::*;
#[cfg(feature = "file-logging")]
pub use file::{init_file_logging, LoggingGuard};
pub use init::*;

/// Known spikenet crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "spikenet",
    "spikenet-config",
    "spikenet-npu-neural",
    "spikenet-brain-development",
    "spikenet-npu-burst-engine",
];

/// Tracing target for a crate name (`spikenet-npu-neural` -> `spikenet_npu_neural`)
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
