// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Integration Tests: Random Networks
//!
//! Builds seeded random networks of mixed neuron types, primes them with
//! [`RandomPrimer`] and runs them to the clock bound. Checks that every
//! tick reports a full-width output and that the per-tick counts add up to
//! the machine statistics.

use std::cell::RefCell;
use std::rc::Rc;

use delaynet_npu_engine::{Machine, MachineState, Network, NeuronSpec, RandomPrimer, TickSummary};
use delaynet_npu_neural::{AlwaysOn, AxonSpec, Clock, Connection, NeuronRef, NoRetention, VariableDecay};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const NEURONS: usize = 100;
const OUTPUTS: usize = 10;
const TICKS: i64 = 200;
const CONNECTION_PROBABILITY: f64 = 0.3;

// ═══════════════════════════════════════════════════════════
// Helper Functions
// ═══════════════════════════════════════════════════════════

fn random_spec(rng: &mut StdRng) -> NeuronSpec {
    match rng.gen_range(0..10) {
        0 => NeuronSpec::new(AlwaysOn),
        1..=5 => NeuronSpec::new(NoRetention),
        _ => {
            let decay = VariableDecay::from_pairs(
                &[(1, rng.gen_range(0.5..1.0)), (4, 0.5)],
                &[(2, rng.gen_range(0.0..0.5))],
            )
            .unwrap();
            NeuronSpec::new(decay)
        }
    }
}

/// `(length, weight)` per ordered pair; row 0 is the input row.
fn random_wiring(rng: &mut StdRng) -> Vec<Vec<Option<(u32, f32)>>> {
    (0..=NEURONS)
        .map(|_| {
            (0..NEURONS)
                .map(|_| {
                    rng.gen_bool(CONNECTION_PROBABILITY)
                        .then(|| (rng.gen_range(1..=5), rng.gen_range(-0.5..1.2)))
                })
                .collect()
        })
        .collect()
}

fn random_network(seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    let specs = (0..NEURONS).map(|_| random_spec(&mut rng)).collect();
    let wiring = random_wiring(&mut rng);

    Network::create(specs, OUTPUTS, |from, to| {
        let row = match from {
            NeuronRef::Input => 0,
            NeuronRef::Index(id) => id.0 as usize + 1,
        };
        match wiring[row][to.0 as usize] {
            Some((length, weight)) => Connection::Spec(AxonSpec::scalar(length, weight)),
            None => Connection::None,
        }
    })
    .unwrap()
}

/// Run a random network to the bound and check the run bookkeeping.
fn run_and_check(seed: u64) -> Vec<TickSummary> {
    let mut machine = Machine::new(random_network(seed), Clock::bounded(TICKS).unwrap())
        .with_feeder(RandomPrimer::new(seed));

    let summaries = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&summaries);
    machine.on_tick(move |event| sink.borrow_mut().push(event.summary()));

    let outputs = machine.run_collect(None).unwrap();
    assert_eq!(outputs.len(), TICKS as usize);
    assert!(outputs.iter().all(|output| output.len() == OUTPUTS));
    assert!(outputs.iter().flatten().all(|charge| charge.is_finite()));
    assert_eq!(machine.state(), MachineState::Exhausted);

    let summaries = summaries.borrow().clone();
    let stats = machine.stats();
    assert_eq!(stats.ticks, TICKS as u64);
    assert_eq!(stats.feedback_count, 0);
    assert_eq!(
        stats.deliveries,
        summaries.iter().map(|s| s.emitting_axon_count as u64).sum::<u64>()
    );
    assert_eq!(
        stats.excitations,
        summaries.iter().map(|s| s.excitation_count as u64).sum::<u64>()
    );
    for (expected_time, summary) in (0..TICKS).zip(&summaries) {
        assert_eq!(summary.time, expected_time);
        assert!(summary.excitation_count <= NEURONS);
        assert!(!summary.stop);
    }
    for (summary, output) in summaries.iter().zip(&outputs) {
        assert_eq!(&summary.output, output);
    }
    summaries
}

// ═══════════════════════════════════════════════════════════
// Random networks
// ═══════════════════════════════════════════════════════════

#[test]
fn test_random_network_runs_to_bound() {
    let summaries = run_and_check(42);
    assert!(summaries.iter().any(|s| s.excitation_count > 0));
    assert!(summaries.iter().any(|s| s.emitting_axon_count > 0));
}

#[test]
fn test_random_network_is_reproducible() {
    assert_eq!(run_and_check(7), run_and_check(7));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_random_networks_keep_bookkeeping(seed in any::<u64>()) {
        run_and_check(seed);
    }
}
