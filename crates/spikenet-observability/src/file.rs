// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! File logging with per-run folders and retention
//!
//! ```text
//! ./logs/
//!   └── run_20250101_120000/
//!       └── spikenet.log (JSON lines)
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, Utc};
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::LoggingSettings;
use crate::init::build_env_filter;

const RUN_PREFIX: &str = "run_";
const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Keeps the non-blocking writer alive; logs are flushed on drop
pub struct LoggingGuard {
    _file_guard: tracing_appender::non_blocking::WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    /// Get the log directory path
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Initialize console + file logging
///
/// # Arguments
/// * `settings` - Base level and console format
/// * `debug_flags` - Per-crate debug flags
/// * `log_dir` - Base directory for logs (default: `./logs`)
/// * `retention_runs` - Keep N most recent runs (default: 10)
pub fn init_file_logging(
    settings: &LoggingSettings,
    debug_flags: &CrateDebugFlags,
    log_dir: Option<PathBuf>,
    retention_runs: Option<usize>,
) -> Result<LoggingGuard> {
    let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));

    let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
    let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    cleanup_old_runs(&base_log_dir, retention_runs.unwrap_or(10))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(build_env_filter(settings, debug_flags)?);

    let file_appender = rolling::never(&run_folder, "spikenet.log");
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(build_env_filter(settings, debug_flags)?);

    Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_dir: run_folder,
    })
}

/// Remove all but the newest `retention_runs` run folders
fn cleanup_old_runs(base_log_dir: &Path, retention_runs: usize) -> Result<()> {
    if !base_log_dir.exists() {
        return Ok(());
    }

    let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
    for entry in std::fs::read_dir(base_log_dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let Some(stamp) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix(RUN_PREFIX))
        else {
            continue;
        };
        if let Ok(dt) = NaiveDateTime::parse_from_str(stamp, RUN_TIMESTAMP_FORMAT) {
            runs.push((path, dt));
        }
    }

    // oldest first
    runs.sort_by_key(|(_, dt)| *dt);

    let excess = runs.len().saturating_sub(retention_runs);
    for (path, _) in runs.into_iter().take(excess) {
        if let Err(e) = std::fs::remove_dir_all(&path) {
            tracing::warn!("Failed to remove old log directory {}: {}", path.display(), e);
        }
    }

    Ok(())
}
