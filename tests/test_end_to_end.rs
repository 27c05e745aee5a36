// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end: TOML file → validated config → simulator → JSON-lines frames

use std::collections::HashMap;
use std::fs;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use spikenet::burst_engine::RunSummary;
use spikenet::prelude::*;
use tempfile::tempdir;

const SMALL_NETWORK: &str = r#"
[network]
node_count = 12
out_degree = 3

[simulation]
steps = 25
seed = 7

[propagation]
noise = { min = -0.25, max = 0.25 }

[logging]
level = "debug"
format = "json"
"#;

fn load_small_network(overrides: Option<&HashMap<String, String>>) -> SpikenetConfig {
    let dir = tempdir().unwrap();
    let path = dir.path().join("spikenet.toml");
    fs::write(&path, SMALL_NETWORK).unwrap();
    load_config(Some(path.as_path()), overrides).unwrap()
}

fn record(config: &SpikenetConfig) -> Vec<Value> {
    let mut sim = Simulator::new(config).unwrap();
    let mut recorder = JsonLinesRecorder::new(Vec::new());
    let summary = sim.run(&mut recorder).unwrap();
    assert_eq!(
        summary,
        RunSummary {
            steps_run: config.simulation.steps,
            final_step: config.simulation.steps,
            cancelled: false,
        }
    );

    String::from_utf8(recorder.into_inner().unwrap())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_toml_config_drives_simulation() {
    let config = load_small_network(None);
    assert_eq!(config.network.node_count, 12);
    assert_eq!(config.simulation.steps, 25);
    // Sections missing from the file fall back to defaults
    assert_eq!(config.dynamics.spike_cutoff, 30.0);
    validate_config(&config).unwrap();

    let lines = record(&config);
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0]["type"], "topology");
    assert_eq!(lines[0]["edges"].as_array().unwrap().len(), 12 * 3);

    for (i, frame) in lines[1..].iter().enumerate() {
        assert_eq!(frame["step"], (i + 1) as u64);
        for v in frame["membrane_potentials"].as_array().unwrap() {
            let v = v.as_f64().unwrap();
            assert!((-80.0..=80.0).contains(&v));
        }
    }
}

#[test]
fn test_recorded_output_is_reproducible() {
    let config = load_small_network(None);
    assert_eq!(record(&config), record(&config));
}

#[test]
fn test_cli_overrides_apply_on_top_of_file() {
    let mut overrides = HashMap::new();
    overrides.insert("steps".to_string(), "5".to_string());
    overrides.insert("seed".to_string(), "99".to_string());

    let config = load_small_network(Some(&overrides));
    assert_eq!(config.simulation.steps, 5);
    assert_eq!(config.simulation.seed, 99);
    assert_eq!(record(&config).len(), 6);
}

#[test]
fn test_out_degree_not_below_node_count_rejected_before_any_step() {
    let mut overrides = HashMap::new();
    overrides.insert("out_degree".to_string(), "12".to_string());
    let config = load_small_network(Some(&overrides));

    assert!(validate_config(&config).is_err());
    assert!(matches!(
        Simulator::new(&config),
        Err(SimulationError::Configuration(_))
    ));
}

#[test]
fn test_seeded_and_injected_rng_agree() {
    let config = load_small_network(None);
    let mut seeded = Simulator::new(&config).unwrap();
    let mut injected = Simulator::with_rng(&config, StdRng::seed_from_u64(7)).unwrap();

    seeded.run(&mut NullObserver).unwrap();
    injected.run(&mut NullObserver).unwrap();
    assert_eq!(seeded.neuron_state(), injected.neuron_state());
    assert_eq!(seeded.last_input_current(), injected.last_input_current());
}
