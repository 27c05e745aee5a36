// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Step loop microbenchmarks
//!
//! Notes:
//! - Fixed seeds, no I/O.
//! - Each iteration builds a fresh simulator so steps never hit the Done state.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use spikenet_brain_development::seeded_rng;
use spikenet_config::SpikenetConfig;
use spikenet_npu_burst_engine::{DynamicsEngine, NeuronState, PropagationEngine, Simulator};
use spikenet_npu_neural::{Connectome, EdgeWeights, IzhikevichParameters, NeuronId, UniformRange};

const STEPS_PER_ITER: u64 = 50;

fn network_config(node_count: usize, out_degree: usize) -> SpikenetConfig {
    let mut config = SpikenetConfig::default();
    config.network.node_count = node_count;
    config.network.out_degree = out_degree;
    config.simulation.steps = STEPS_PER_ITER;
    config
}

fn bench_simulation_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_steps");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for &(node_count, out_degree) in &[(200usize, 3usize), (2_000, 10), (20_000, 10)] {
        let config = network_config(node_count, out_degree);
        group.throughput(Throughput::Elements(node_count as u64 * STEPS_PER_ITER));
        group.bench_with_input(
            BenchmarkId::new("run", format!("{}n_{}k", node_count, out_degree)),
            &config,
            |b, config| {
                b.iter_batched(
                    || Simulator::new(config).expect("valid benchmark config"),
                    |mut sim| {
                        for _ in 0..STEPS_PER_ITER {
                            black_box(sim.step().expect("step"));
                        }
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_engines(c: &mut Criterion) {
    let mut group = c.benchmark_group("engines");
    group.sample_size(20);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(1));

    let node_count = 10_000;
    let out_degree = 10;

    // Deterministic ring-neighbourhood wiring
    let adjacency: Vec<Vec<NeuronId>> = (0..node_count)
        .map(|source| {
            (1..=out_degree)
                .map(|offset| NeuronId::from((source + offset) % node_count))
                .collect()
        })
        .collect();
    let connectome = Connectome::from_adjacency(adjacency).expect("ring wiring");
    let weights =
        EdgeWeights::new(&connectome, vec![1.0; connectome.edge_count()]).expect("weights");
    let params = vec![IzhikevichParameters::regular_spiking(); node_count];

    // 1% of neurons above threshold
    let potentials: Vec<f64> = (0..node_count)
        .map(|i| if i % 100 == 0 { 40.0 } else { -65.0 })
        .collect();
    let state = NeuronState::from_parts(potentials, vec![0.0; node_count]).expect("state");

    group.throughput(Throughput::Elements(node_count as u64));

    group.bench_function("propagation_10k_10syn", |b| {
        let engine = PropagationEngine::new(0.0, UniformRange::new(-0.5, 0.5));
        let mut rng = seeded_rng(42);
        let mut current = Vec::with_capacity(node_count);
        b.iter(|| {
            engine
                .compute_input_current(
                    black_box(&state),
                    &params,
                    &connectome,
                    &weights,
                    &mut rng,
                    &mut current,
                )
                .expect("propagation")
        });
    });

    group.bench_function("dynamics_10k", |b| {
        let mut engine = DynamicsEngine::new(30.0, UniformRange::new(-80.0, 80.0));
        let input = vec![5.0; node_count];
        b.iter_batched(
            || state.clone(),
            |mut s| {
                engine
                    .process(&mut s, &params, black_box(&input), 1)
                    .expect("dynamics")
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_simulation_steps, bench_engines);
criterion_main!(benches);
