// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Integration Tests: Small Circuits
//!
//! End-to-end runs of hand-wired networks with known outputs:
//! - Single relay neuron and self-loop
//! - AND / XOR style summation
//! - NOT gate driven by a bias neuron
//! - Multi-channel charge

use std::sync::{Arc, Mutex};

use delaynet_npu_engine::{DeterministicFeeder, Machine, Network, NeuronSpec, UniformPrimer};
use delaynet_npu_neural::{
    AlwaysOn, AxonSpec, BasicFeedback, Clock, ClockState, Connection, Feedback, FnWeightUpdate,
    NeuronId, NeuronRef, NoRetention, Tick, WeightUpdateContext,
};

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

/// One no-retention neuron fed by one length-1, weight-1 input axon,
/// optionally with a self-loop of the given length.
fn relay(self_loop: Option<u32>) -> Network {
    Network::create(vec![NeuronSpec::new(NoRetention)], 1, move |from, _| match from {
        NeuronRef::Input => Connection::Spec(AxonSpec::scalar(1, 1.0)),
        NeuronRef::Index(_) => self_loop
            .map(|length| Connection::Spec(AxonSpec::scalar(length, 1.0)))
            .unwrap_or_default(),
    })
    .unwrap()
}

/// Two input-driven neurons feeding a third with `weights`.
fn gate(weights: [f32; 2], inputs: [bool; 2]) -> f32 {
    let network = Network::create(
        vec![
            NeuronSpec::new(NoRetention),
            NeuronSpec::new(NoRetention),
            NeuronSpec::new(NoRetention),
        ],
        1,
        |from, to| match (from, to.0) {
            (NeuronRef::Input, 0 | 1) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            (NeuronRef::Index(NeuronId(f)), 2) if f < 2 => {
                Connection::Spec(AxonSpec::scalar(1, weights[f as usize]))
            }
            _ => Connection::None,
        },
    )
    .unwrap();

    let mut machine = Machine::new(network, Clock::bounded(2).unwrap())
        .with_feeder(DeterministicFeeder::once(inputs.to_vec()));
    machine.run(None).unwrap()[0]
}

// ═══════════════════════════════════════════════════════════
// Relay
// ═══════════════════════════════════════════════════════════

#[test]
fn test_single_neuron_first_tick() {
    let mut machine = Machine::new(relay(None), Clock::unbounded()).with_feeder(UniformPrimer);
    assert_eq!(machine.run(Some(1)).unwrap(), vec![1.0]);
}

#[test]
fn test_single_neuron_loses_charge() {
    let mut machine = Machine::new(relay(None), Clock::unbounded()).with_feeder(UniformPrimer);
    assert_eq!(
        machine.run_collect(Some(2)).unwrap(),
        vec![vec![1.0], vec![0.0]]
    );
}

#[test]
fn test_self_loop_refires() {
    let mut machine = Machine::new(relay(Some(2)), Clock::unbounded()).with_feeder(UniformPrimer);
    assert_eq!(
        machine.run_collect(Some(3)).unwrap(),
        vec![vec![1.0], vec![0.0], vec![1.0]]
    );
}

#[test]
fn test_self_loop_keeps_period() {
    let mut machine = Machine::new(relay(Some(3)), Clock::unbounded()).with_feeder(UniformPrimer);
    let outputs: Vec<f32> = machine
        .run_collect(Some(10))
        .unwrap()
        .into_iter()
        .map(|o| o[0])
        .collect();
    assert_eq!(
        outputs,
        vec![1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]
    );
}

// ═══════════════════════════════════════════════════════════
// AND / XOR
// ═══════════════════════════════════════════════════════════

#[test]
fn test_and_gate() {
    let w = 0.5;
    assert_eq!(gate([w, w], [true, true]), 2.0 * w);
    assert_eq!(gate([w, w], [true, false]), w);
    assert_eq!(gate([w, w], [false, true]), w);
    assert_eq!(gate([w, w], [false, false]), 0.0);
}

#[test]
fn test_and_gate_unit_weight() {
    assert_eq!(gate([1.0, 1.0], [true, true]), 2.0);
    assert_eq!(gate([1.0, 1.0], [true, false]), 1.0);
    assert_eq!(gate([1.0, 1.0], [false, true]), 1.0);
    assert_eq!(gate([1.0, 1.0], [false, false]), 0.0);
}

#[test]
fn test_xor_gate() {
    assert_eq!(gate([1.0, -1.0], [true, true]), 0.0);
    assert_eq!(gate([1.0, -1.0], [true, false]), 1.0);
    assert_eq!(gate([1.0, -1.0], [false, true]), -1.0);
    assert_eq!(gate([1.0, -1.0], [false, false]), 0.0);
}

// ═══════════════════════════════════════════════════════════
// NOT gate with a bias neuron
// ═══════════════════════════════════════════════════════════

#[test]
fn test_not_gate() {
    let network = Network::create(
        vec![
            NeuronSpec::new(AlwaysOn).labeled("bias"),
            NeuronSpec::new(NoRetention).labeled("not"),
        ],
        1,
        |from, to| match (from, to.0) {
            (NeuronRef::Input, 1) => Connection::Spec(AxonSpec::scalar(1, -1.0)),
            (NeuronRef::Index(NeuronId(0)), 1) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            _ => Connection::None,
        },
    )
    .unwrap();
    assert_eq!(network.neuron_index("not"), Some(NeuronId(1)));

    let feeder = DeterministicFeeder::new(vec![
        vec![false],
        vec![false],
        vec![true],
        vec![true],
        vec![false],
    ]);
    let mut machine = Machine::new(network, Clock::bounded(5).unwrap()).with_feeder(feeder);
    let outputs: Vec<f32> = machine
        .run_collect(None)
        .unwrap()
        .into_iter()
        .map(|o| o[0])
        .collect();
    assert_eq!(outputs, vec![0.0, 1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_bias_neuron_fires_every_tick() {
    let network = Network::create(
        vec![NeuronSpec::new(AlwaysOn), NeuronSpec::new(NoRetention)],
        1,
        |from, to| match (from, to.0) {
            (NeuronRef::Index(NeuronId(0)), 1) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            _ => Connection::None,
        },
    )
    .unwrap();
    let mut machine = Machine::new(network, Clock::bounded(4).unwrap());
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    machine.on_tick(move |event| sink.lock().unwrap().push(event.excitation_count));

    let outputs = machine.run_collect(None).unwrap();
    assert_eq!(outputs, vec![vec![0.0], vec![1.0], vec![1.0], vec![1.0]]);

    let excitations = log.lock().unwrap().clone();
    // Bias alone at tick 0, then bias and relay
    assert_eq!(excitations, vec![1, 2, 2, 2]);
}

// ═══════════════════════════════════════════════════════════
// Multi-channel charge
// ═══════════════════════════════════════════════════════════

#[test]
fn test_multi_weight_axon_from_single_weight_input() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let strategy = Arc::new(FnWeightUpdate::new(
        "record-width",
        move |weights: &mut [f32], ctx: &WeightUpdateContext<'_>| {
            recorder.lock().unwrap().push((ctx.time, weights.len()));
        },
    ));

    let network = Network::create(
        vec![NeuronSpec::new(NoRetention), NeuronSpec::new(NoRetention)],
        1,
        move |from, to| match (from, to.0) {
            (NeuronRef::Input, 0) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            (NeuronRef::Index(NeuronId(0)), 1) => Connection::Spec(
                AxonSpec::new(1, vec![1.5, 0.25]).with_update(strategy.clone()),
            ),
            _ => Connection::None,
        },
    )
    .unwrap();

    let feedback = |_: &[f32], clock: ClockState| -> Option<Box<dyn Feedback>> {
        (clock.time < 2).then(|| Box::new(BasicFeedback::proceed()) as Box<dyn Feedback>)
    };
    let mut machine = Machine::new(network, Clock::bounded(3).unwrap())
        .with_feeder(UniformPrimer)
        .with_feedback(feedback);

    let outputs = machine.run_collect(None).unwrap();
    assert_eq!(outputs, vec![vec![0.0], vec![1.5], vec![0.0]]);
    assert_eq!(seen.lock().unwrap().as_slice(), &[(0 as Tick, 2), (1, 2)]);

    let target = machine.network().neuron(NeuronId(1)).unwrap();
    assert_eq!(target.charge().len(), 2);
}
