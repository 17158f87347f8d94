// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integration Tests: Config-Driven Runs
//!
//! Tests the path from `delaynet.toml` to a finished run:
//! - File loading, CLI overrides and validation
//! - Primer selection
//! - Blueprints with feedback sources
//! - JSON tick summaries from observers

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use delaynet::config::ConfigError;
use delaynet::prelude::*;
use delaynet::SimulationError;
use tempfile::{tempdir, TempDir};

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

fn write_config(dir: &TempDir, lines: &[&str]) -> PathBuf {
    let path = dir.path().join("delaynet.toml");
    let mut file = File::create(&path).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    path
}

fn load(path: &Path, overrides: &[(&str, &str)]) -> Result<Simulation, SimulationError> {
    let cli: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Simulation::load(Some(path), Some(&cli))
}

/// input -> N0 -(length 2)-> N1, output N1
fn delayed_relay() -> Network {
    Network::create(
        vec![NeuronSpec::new(NoRetention), NeuronSpec::new(NoRetention)],
        1,
        |from, to| match (from, to.0) {
            (NeuronRef::Input, 0) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            (NeuronRef::Index(NeuronId(0)), 1) => Connection::Spec(AxonSpec::scalar(2, 1.0)),
            _ => Connection::None,
        },
    )
    .unwrap()
}

/// Bias neuron whose outgoing weight shrinks until the output goes quiet.
struct Fading;

impl Blueprint for Fading {
    fn neurons(&self) -> Vec<NeuronSpec> {
        vec![NeuronSpec::new(AlwaysOn), NeuronSpec::new(NoRetention)]
    }

    fn output_count(&self) -> usize {
        1
    }

    fn connection(&self, from: NeuronRef, to: NeuronId) -> Connection {
        match (from, to.0) {
            (NeuronRef::Index(NeuronId(0)), 1) => {
                let update = Arc::new(FnWeightUpdate::new(
                    "fade",
                    |weights: &mut [f32], _: &WeightUpdateContext<'_>| weights[0] -= 0.25,
                ));
                Connection::Spec(AxonSpec::scalar(1, 1.0).with_update(update))
            }
            _ => Connection::None,
        }
    }

    fn feedback_source(&self) -> Option<Box<dyn FeedbackSource>> {
        let source = |output: &[f32], clock: ClockState| -> Option<Box<dyn Feedback>> {
            if clock.time == 0 {
                return None;
            }
            let stop = output[0] <= 0.0;
            Some(Box::new(BasicFeedback { stop }))
        };
        Some(Box::new(source))
    }
}

// ═══════════════════════════════════════════════════════════
// Loading
// ═══════════════════════════════════════════════════════════

#[test]
fn test_run_from_config_file() {
    let dir = tempdir().unwrap();
    let path = write_config(
        &dir,
        &[
            "[simulation]",
            "max_time = 4",
            "primer = \"uniform\"",
            "collect_outputs = true",
        ],
    );

    let simulation = load(&path, &[]).unwrap();
    let outcome = simulation.run(delayed_relay()).unwrap();

    assert_eq!(
        outcome.outputs,
        vec![vec![0.0], vec![0.0], vec![1.0], vec![0.0]]
    );
    assert_eq!(outcome.state, MachineState::Exhausted);
    assert_eq!(outcome.stats.deliveries, 2);
}

#[test]
fn test_cli_override_shortens_run() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &["[simulation]", "max_time = 10", "collect_outputs = true"]);

    let simulation = load(&path, &[("simulation.max_time", "2")]).unwrap();
    assert_eq!(simulation.config().max_time, Some(2));

    let outcome = simulation.run(delayed_relay()).unwrap();
    assert_eq!(outcome.outputs.len(), 2);
    assert_eq!(outcome.last_output(), Some(&[0.0][..]));
}

#[test]
fn test_primer_none_from_config() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &["[simulation]", "max_time = 4", "primer = \"none\""]);

    let outcome = load(&path, &[]).unwrap().run(delayed_relay()).unwrap();
    assert_eq!(outcome.stats.excitations, 0);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = tempdir().unwrap();
    let path = write_config(
        &dir,
        &["[simulation]", "max_time = 0", "[logging]", "level = \"loud\""],
    );

    match load(&path, &[]) {
        Err(SimulationError::Config(ConfigError::ValidationError(message))) => {
            assert!(message.contains("simulation.max_time"));
            assert!(message.contains("logging.level"));
        }
        other => panic!("expected a validation error, got {:?}", other.map(|_| ())),
    }
}

// ═══════════════════════════════════════════════════════════
// Blueprints and observers
// ═══════════════════════════════════════════════════════════

#[test]
fn test_blueprint_feedback_stops_run() {
    let dir = tempdir().unwrap();
    let path = write_config(&dir, &["[simulation]", "max_time = 50", "primer = \"none\""]);
    let simulation = load(&path, &[]).unwrap();

    let machine = simulation.build_blueprint(&Fading).unwrap();
    let outcome = simulation.run_machine(machine, None).unwrap();

    // 1.0, 0.75, 0.5, 0.25, 0.0
    assert_eq!(outcome.state, MachineState::Stopped);
    assert_eq!(outcome.final_time, 5);
    assert_eq!(outcome.last_output(), Some(&[0.0][..]));
    assert_eq!(outcome.stats.feedback_count, 5);
}

#[test]
fn test_tick_summaries_serialize() {
    let simulation = Simulation::new(delaynet::config::SimulationConfig {
        max_time: Some(3),
        ..Default::default()
    });
    let mut machine = simulation.build(delayed_relay()).unwrap();

    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    machine.on_tick(move |event| {
        sink.borrow_mut()
            .push(serde_json::to_string(&event.summary()).unwrap())
    });
    simulation.run_machine(machine, None).unwrap();

    let summaries: Vec<TickSummary> = lines
        .borrow()
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(summaries.len(), 3);
    assert_eq!(summaries[0].emitting_axon_count, 1);
    assert_eq!(summaries[2].output, vec![1.0]);
}
