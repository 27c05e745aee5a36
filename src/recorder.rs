// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! JSON-lines output for external renderers
//!
//! One `{"type":"topology",...}` record, then one `{"type":"step",...}` record
//! per committed step. Layout, colour and image encoding are left to the
//! consumer.

use std::io::Write;

use serde::Serialize;
use spikenet_npu_burst_engine::{NetworkTopology, StateObserver, StepFrame};
use spikenet_npu_neural::NeuronId;

#[derive(Debug, Serialize)]
struct EdgeRecord {
    source: NeuronId,
    target: NeuronId,
    weight: f64,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Topology {
        node_count: usize,
        edges: Vec<EdgeRecord>,
    },
    Step {
        step: u64,
        membrane_potentials: &'a [f64],
        recovery_variables: &'a [f64],
        input_current: &'a [f64],
        fired: &'a [NeuronId],
    },
}

/// Writes topology and step frames as JSON lines
pub struct JsonLinesRecorder<W: Write> {
    writer: W,
    frames_written: u64,
}

impl<W: Write> JsonLinesRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Flush and hand back the writer
    pub fn into_inner(mut self) -> std::io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_record(&mut self, record: &Record<'_>) -> Result<(), String> {
        serde_json::to_writer(&mut self.writer, record).map_err(|e| e.to_string())?;
        self.writer.write_all(b"\n").map_err(|e| e.to_string())
    }
}

impl<W: Write> StateObserver for JsonLinesRecorder<W> {
    fn on_topology(&mut self, topology: &NetworkTopology<'_>) -> Result<(), String> {
        let edges = topology
            .weighted_edges()
            .map(|(source, target, weight)| EdgeRecord {
                source,
                target,
                weight,
            })
            .collect();
        self.write_record(&Record::Topology {
            node_count: topology.node_count(),
            edges,
        })
    }

    fn on_step(&mut self, frame: &StepFrame<'_>) -> Result<(), String> {
        self.write_record(&Record::Step {
            step: frame.step,
            membrane_potentials: frame.membrane_potentials,
            recovery_variables: frame.recovery_variables,
            input_current: frame.input_current,
            fired: frame.fired,
        })?;
        self.frames_written += 1;
        Ok(())
    }
}
