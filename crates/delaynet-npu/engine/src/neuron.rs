// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Neuron
//!
//! Charge accumulator with threshold-triggered excitation and lazy decay.
//!
//! Charge is a vector of channels; channel 0 is the effective charge compared
//! against [`EXCITATION_THRESHOLD`]. Decay is applied by catching up every
//! tick from `decay_updated_time + 1` through the requested tick, so a
//! neuron that is not touched for a while is never decayed twice for the
//! same tick.

use std::sync::Arc;

use delaynet_npu_neural::{AxonId, DecayStrategy, Tick, EXCITATION_THRESHOLD, UNSTARTED};
use tracing::trace;

/// Construction-time description of a neuron.
#[derive(Debug, Clone)]
pub struct NeuronSpec {
    pub decay: Arc<dyn DecayStrategy>,
    pub label: Option<String>,
}

impl NeuronSpec {
    pub fn new(decay: impl DecayStrategy + 'static) -> Self {
        Self {
            decay: Arc::new(decay),
            label: None,
        }
    }

    /// Share one decay type between many neurons.
    pub fn shared(decay: Arc<dyn DecayStrategy>) -> Self {
        Self { decay, label: None }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct Neuron {
    charge: Vec<f32>,
    decay_updated_time: Tick,
    last_excitation_time: Option<Tick>,
    last_received_charge_time: Option<Tick>,
    outgoing: Vec<AxonId>,
    decay: Arc<dyn DecayStrategy>,
    label: Option<String>,
    scratch: Vec<f32>,
}

impl Neuron {
    pub(crate) fn new(spec: NeuronSpec) -> Self {
        let initial = spec.decay.initial_charge();
        Self {
            charge: vec![initial],
            decay_updated_time: UNSTARTED,
            last_excitation_time: None,
            // A preset charge counts as received at tick 0
            last_received_charge_time: (initial != 0.0).then_some(0),
            outgoing: Vec::new(),
            decay: spec.decay,
            label: spec.label,
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn effective_charge(&self) -> f32 {
        self.charge[0]
    }

    pub fn charge(&self) -> &[f32] {
        &self.charge
    }

    #[inline]
    pub fn is_above_threshold(&self) -> bool {
        self.effective_charge() >= EXCITATION_THRESHOLD
    }

    pub fn decay_updated_time(&self) -> Tick {
        self.decay_updated_time
    }

    pub fn last_excitation_time(&self) -> Option<Tick> {
        self.last_excitation_time
    }

    pub fn last_received_charge_time(&self) -> Option<Tick> {
        self.last_received_charge_time
    }

    pub fn outgoing(&self) -> &[AxonId] {
        &self.outgoing
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn decay_strategy(&self) -> &Arc<dyn DecayStrategy> {
        &self.decay
    }

    pub(crate) fn connect(&mut self, axon: AxonId) {
        self.outgoing.push(axon);
    }

    /// Add `delta` channel-wise, growing the charge vector if `delta` is wider.
    ///
    /// Returns true if the effective charge is at or above threshold afterwards,
    /// i.e. the neuron must be (re-)registered as a potential excitation.
    pub(crate) fn receive(&mut self, delta: &[f32], at: Tick) -> bool {
        if delta.len() > self.charge.len() {
            self.charge.resize(delta.len(), 0.0);
        }
        for (charge, d) in self.charge.iter_mut().zip(delta) {
            *charge += d;
        }
        self.last_received_charge_time = Some(at);
        self.is_above_threshold()
    }

    /// Record an excitation. False if the neuron already excited at `at`.
    pub(crate) fn excite(&mut self, at: Tick) -> bool {
        if self.last_excitation_time == Some(at) {
            return false;
        }
        self.last_excitation_time = Some(at);
        true
    }

    /// Apply every pending tick of decay up to and including `upto`.
    pub(crate) fn decay(&mut self, upto: Tick, trace_enabled: bool) {
        if upto <= self.decay_updated_time {
            return;
        }
        for tick in (self.decay_updated_time + 1)..=upto {
            let since_charge = self.last_received_charge_time.map(|t| tick - t);
            let since_excitation = self.last_excitation_time.map(|t| tick - t);

            if since_charge.is_none() && since_excitation.is_none() {
                self.charge.fill(0.0);
                continue;
            }

            self.scratch.resize(self.charge.len(), 0.0);
            self.decay
                .decay_channels(since_charge, since_excitation, &mut self.scratch);
            for (charge, multiplier) in self.charge.iter_mut().zip(&self.scratch) {
                *charge *= multiplier;
            }

            if trace_enabled {
                trace!(
                    "[NEURON] tick={} since_charge={:?} since_excitation={:?} multipliers={:?} charge={:?}",
                    tick,
                    since_charge,
                    since_excitation,
                    self.scratch,
                    self.charge
                );
            }
        }
        self.decay_updated_time = upto;
    }
}
