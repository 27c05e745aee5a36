// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Headless simulation runner.
//!
//! Loads `spikenet.toml` (or defaults), runs the configured network and streams
//! topology plus per-step frames as JSON lines to stdout or a file. Ctrl-C is
//! not handled; the run is synchronous and short.

use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use spikenet::config::{
    apply_cli_overrides, apply_environment_overrides, find_config_file, load_config, ConfigError,
    SpikenetConfig,
};
use spikenet::observability::{debug_flags_help, parse_debug_flags, LogFormat, LoggingSettings};
use spikenet::prelude::*;
use tracing::info;

struct Args {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    overrides: HashMap<String, String>,
    #[cfg_attr(not(feature = "file-logging"), allow(dead_code))]
    log_dir: Option<PathBuf>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: run_simulation [--config <path>] [--output <path>] [--set <key>=<value>]... [--log-dir <path>]\n\n\
         Overridable keys: node_count, out_degree, steps, seed, log_level\n\
         Defaults:\n\
         - config: SPIKENET_CONFIG_PATH, ./spikenet.toml or a parent directory, else built-in defaults\n\
         - output: stdout\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_args() -> Args {
    let mut parsed = Args {
        config: None,
        output: None,
        overrides: HashMap::new(),
        log_dir: None,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.config = Some(PathBuf::from(v));
            }
            "--output" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.output = Some(PathBuf::from(v));
            }
            "--log-dir" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                parsed.log_dir = Some(PathBuf::from(v));
            }
            "--set" => {
                let v = args.next().unwrap_or_else(|| usage_and_exit());
                let Some((key, value)) = v.split_once('=') else {
                    eprintln!("Expected <key>=<value>, got: {v}");
                    usage_and_exit();
                };
                parsed
                    .overrides
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            // Handled by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    parsed
}

fn resolve_config(args: &Args) -> Result<SpikenetConfig> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => match find_config_file() {
            Ok(path) => Some(path),
            Err(ConfigError::FileNotFound(_)) if env::var("SPIKENET_CONFIG_PATH").is_err() => None,
            Err(e) => return Err(e.into()),
        },
    };

    let config = match &path {
        Some(path) => load_config(Some(path.as_path()), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = SpikenetConfig::default();
            apply_environment_overrides(&mut config)?;
            apply_cli_overrides(&mut config, &args.overrides)?;
            config
        }
    };

    validate_config(&config)?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = parse_args();
    let config = resolve_config(&args)?;

    let debug_flags = parse_debug_flags();
    let format: LogFormat = config.logging.format.parse()?;
    let settings = LoggingSettings::new(config.logging.level.clone(), format);

    #[cfg(feature = "file-logging")]
    let _log_guard = spikenet::observability::init_file_logging(
        &settings,
        &debug_flags,
        args.log_dir.clone(),
        None,
    )?;
    #[cfg(not(feature = "file-logging"))]
    spikenet::observability::init_console_logging(&settings, &debug_flags)?;

    info!(
        "Running {} neurons (k = {}) for {} steps, seed {}",
        config.network.node_count,
        config.network.out_degree,
        config.simulation.steps,
        config.simulation.seed
    );

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut sim = Simulator::new(&config)?;
    let mut recorder = JsonLinesRecorder::new(BufWriter::new(writer));
    let summary = sim.run(&mut recorder)?;
    recorder.into_inner().context("Failed to flush output")?;

    let stats = sim.stats();
    info!(
        "Finished at step {} ({} firings, avg {:.2} fired/step, avg {:.1}us/step)",
        summary.final_step,
        stats.total_neurons_fired,
        stats.avg_neurons_fired_per_step(),
        stats.avg_processing_time_us()
    );

    Ok(())
}
