// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! Override values that fail to parse are reported, never skipped.

use crate::{ConfigError, ConfigResult, SpikenetConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "spikenet.toml";

/// Find the spikenet configuration file
///
/// Search order:
/// 1. `SPIKENET_CONFIG_PATH` environment variable
/// 2. Current working directory: `./spikenet.toml`
/// 3. Parent directories (up to 5 levels)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("SPIKENET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by SPIKENET_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();

    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Configuration file '{}' not found in any of these locations:\n{}\n\nSet SPIKENET_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Parse configuration from TOML text (no overrides applied)
pub fn parse_config_str(content: &str) -> ConfigResult<SpikenetConfig> {
    Ok(toml::from_str(content)?)
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Returns
///
/// Complete `SpikenetConfig` with all overrides applied. Validation is left to the
/// caller (`validate_config`) so tools can report it separately.
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or an override
/// value cannot be parsed
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<SpikenetConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config = parse_config_str(&content)?;

    // Apply overrides in order
    apply_environment_overrides(&mut config)?;

    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

fn parse_override<T: FromStr>(source: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse::<T>().map_err(|_| {
        ConfigError::InvalidValue(format!("{} = \"{}\" cannot be parsed", source, value))
    })
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `SPIKENET_NODE_COUNT` -> `network.node_count`
/// - `SPIKENET_OUT_DEGREE` -> `network.out_degree`
/// - `SPIKENET_STEPS` -> `simulation.steps`
/// - `SPIKENET_SEED` -> `simulation.seed`
/// - `SPIKENET_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut SpikenetConfig) -> ConfigResult<()> {
    if let Ok(value) = env::var("SPIKENET_NODE_COUNT") {
        config.network.node_count = parse_override("SPIKENET_NODE_COUNT", &value)?;
    }
    if let Ok(value) = env::var("SPIKENET_OUT_DEGREE") {
        config.network.out_degree = parse_override("SPIKENET_OUT_DEGREE", &value)?;
    }
    if let Ok(value) = env::var("SPIKENET_STEPS") {
        config.simulation.steps = parse_override("SPIKENET_STEPS", &value)?;
    }
    if let Ok(value) = env::var("SPIKENET_SEED") {
        config.simulation.seed = parse_override("SPIKENET_SEED", &value)?;
    }
    if let Ok(value) = env::var("SPIKENET_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"node_count": "500", "seed": "7"}`)
pub fn apply_cli_overrides(
    config: &mut SpikenetConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("node_count") {
        config.network.node_count = parse_override("node_count", value)?;
    }
    if let Some(value) = cli_args.get("out_degree") {
        config.network.out_degree = parse_override("out_degree", value)?;
    }
    if let Some(value) = cli_args.get("steps") {
        config.simulation.steps = parse_override("steps", value)?;
    }
    if let Some(value) = cli_args.get("seed") {
        config.simulation.seed = parse_override("seed", value)?;
    }
    if let Some(value) = cli_args.get("log_level") {
        config.logging.level = value.clone();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARS: [&str; 5] = [
        "SPIKENET_NODE_COUNT",
        "SPIKENET_OUT_DEGREE",
        "SPIKENET_STEPS",
        "SPIKENET_SEED",
        "SPIKENET_LOG_LEVEL",
    ];

    fn clear_override_vars() {
        for var in OVERRIDE_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("SPIKENET_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("SPIKENET_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("SPIKENET_CONFIG_PATH", "/definitely/not/here/spikenet.toml");
        let result = find_config_file();
        env::remove_var("SPIKENET_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[network]").unwrap();
        writeln!(file, "node_count = 50").unwrap();
        writeln!(file, "[neuron]").unwrap();
        writeln!(file, "c = {{ min = -70.0, max = -60.0 }}").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.network.node_count, 50);
        assert_eq!(config.network.out_degree, 3);
        assert_eq!(config.neuron.c.min, -70.0);
        assert_eq!(config.neuron.c.max, -60.0);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = parse_config_str("[network\nnode_count = ");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = SpikenetConfig::default();

        env::set_var("SPIKENET_NODE_COUNT", "64");
        env::set_var("SPIKENET_SEED", "7");

        let result = apply_environment_overrides(&mut config);
        clear_override_vars();

        result.unwrap();
        assert_eq!(config.network.node_count, 64);
        assert_eq!(config.simulation.seed, 7);
    }

    #[test]
    fn test_unparsable_environment_override_is_reported() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = SpikenetConfig::default();

        env::set_var("SPIKENET_STEPS", "many");
        let result = apply_environment_overrides(&mut config);
        clear_override_vars();

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
        assert_eq!(config.simulation.steps, 200);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = SpikenetConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("out_degree".to_string(), "5".to_string());
        cli_args.insert("log_level".to_string(), "debug".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.network.out_degree, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_vars();
        // CLI overrides take precedence over environment variables
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[simulation]").unwrap();
        writeln!(file, "steps = 10").unwrap();
        writeln!(file, "seed = 1").unwrap();

        env::set_var("SPIKENET_STEPS", "20");
        env::set_var("SPIKENET_SEED", "2");

        let mut cli_args = HashMap::new();
        cli_args.insert("seed".to_string(), "3".to_string());

        let result = load_config(Some(&config_path), Some(&cli_args));
        clear_override_vars();
        let config = result.unwrap();

        // CLI wins for seed, env wins for steps (no CLI override)
        assert_eq!(config.simulation.seed, 3);
        assert_eq!(config.simulation.steps, 20);
    }
}
