// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Console logging initialization
//!
//! Builds the `EnvFilter` from the configured level plus per-crate debug flags.
//! `RUST_LOG`, when set, replaces the configured level entirely.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingSettings};

/// Build the filter used by every subscriber layer
pub fn build_env_filter(settings: &LoggingSettings, debug_flags: &CrateDebugFlags) -> Result<EnvFilter> {
    if let Ok(directive) = std::env::var("RUST_LOG") {
        return EnvFilter::try_new(&directive)
            .with_context(|| format!("Invalid RUST_LOG directive: {}", directive));
    }

    let filter = debug_flags.to_filter_string(&settings.level);
    EnvFilter::try_new(&filter).with_context(|| format!("Invalid log filter: {}", filter))
}

/// Initialize console logging (stderr)
///
/// Fails if a global subscriber is already installed.
pub fn init_console_logging(settings: &LoggingSettings, debug_flags: &CrateDebugFlags) -> Result<()> {
    let env_filter = build_env_filter(settings, debug_flags)?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match settings.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Initialize logging for tests; repeated calls are ignored
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
