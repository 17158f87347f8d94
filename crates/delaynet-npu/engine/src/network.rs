// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Network
//!
//! Arena of neurons and axons built once from a wiring function.
//!
//! ## Layout
//! - Neurons are addressed by [`NeuronId`] in creation order; the last
//!   `output_count` neurons are the outputs.
//! - Axons (inputs included) are addressed by [`AxonId`]. Input axons are the
//!   ones whose wiring origin was [`NeuronRef::Input`], numbered in the order
//!   of their destination neuron.
//! - Labels map to neuron ids through a lookup table built at construction.
//!
//! Mutation is crate-private: only the machine drives deliveries,
//! excitations, decay and feedback.

use ahash::AHashMap;
use delaynet_npu_neural::{
    AxonId, ClockState, Connection, Feedback, NeuronId, NeuronRef, Tick,
};
use tracing::{debug, trace};

use crate::axon::Axon;
use crate::delay_line::{DelayLine, EmitScheduling};
use crate::error::{EngineError, Result};
use crate::fire_candidates::FireCandidates;
use crate::neuron::{Neuron, NeuronSpec};
use crate::trace::neuron_trace_cfg;

#[derive(Debug, Clone)]
pub struct Network {
    neurons: Vec<Neuron>,
    axons: Vec<Axon>,
    inputs: Vec<AxonId>,
    output_count: usize,
    labels: AHashMap<String, NeuronId>,
}

impl Network {
    /// Build the graph.
    ///
    /// `wiring` is asked about every ordered pair: first `(Input, to)` for
    /// each neuron, then `(Index(from), to)` for every pair of neurons.
    pub fn create<W>(specs: Vec<NeuronSpec>, output_count: usize, mut wiring: W) -> Result<Self>
    where
        W: FnMut(NeuronRef, NeuronId) -> Connection,
    {
        let neuron_count = specs.len();
        if output_count > neuron_count {
            return Err(EngineError::OutputCountExceedsNeurons {
                output_count,
                neuron_count,
            });
        }

        let mut labels = AHashMap::new();
        let mut neurons = Vec::with_capacity(neuron_count);
        for (index, spec) in specs.into_iter().enumerate() {
            if let Some(label) = spec.label.as_ref() {
                if labels.insert(label.clone(), NeuronId(index as u32)).is_some() {
                    return Err(EngineError::DuplicateLabel {
                        label: label.clone(),
                    });
                }
            }
            neurons.push(Neuron::new(spec));
        }

        let mut network = Self {
            neurons,
            axons: Vec::new(),
            inputs: Vec::new(),
            output_count,
            labels,
        };

        let ids: Vec<NeuronId> = (0..neuron_count as u32).map(NeuronId).collect();
        for &to in &ids {
            if let Connection::Spec(spec) = wiring(NeuronRef::Input, to) {
                let id = network.push_axon(Axon::new(spec, NeuronRef::Input, to)?);
                network.inputs.push(id);
            }
        }
        for &from in &ids {
            for &to in &ids {
                if let Connection::Spec(spec) = wiring(NeuronRef::Index(from), to) {
                    let id = network.push_axon(Axon::new(spec, NeuronRef::Index(from), to)?);
                    network.neurons[from.index()].connect(id);
                }
            }
        }

        debug!(
            "[NETWORK] Created {} neurons, {} axons ({} inputs), {} outputs",
            network.neurons.len(),
            network.axons.len(),
            network.inputs.len(),
            network.output_count
        );
        Ok(network)
    }

    fn push_axon(&mut self, axon: Axon) -> AxonId {
        let id = AxonId(self.axons.len() as u32);
        self.axons.push(axon);
        id
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    /// Axons between neurons (inputs excluded).
    pub fn axon_count(&self) -> usize {
        self.axons.len() - self.inputs.len()
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.index())
    }

    pub fn neurons(&self) -> impl Iterator<Item = (NeuronId, &Neuron)> + '_ {
        self.neurons
            .iter()
            .enumerate()
            .map(|(i, n)| (NeuronId(i as u32), n))
    }

    pub fn axon(&self, id: AxonId) -> Option<&Axon> {
        self.axons.get(id.index())
    }

    /// Input axon ids, indexed by input number.
    pub fn inputs(&self) -> &[AxonId] {
        &self.inputs
    }

    pub fn input(&self, index: usize) -> Option<&Axon> {
        self.inputs.get(index).and_then(|&id| self.axon(id))
    }

    pub fn neuron_index(&self, label: &str) -> Option<NeuronId> {
        self.labels.get(label).copied()
    }

    /// Effective charge of the output neurons. Valid for the current tick only.
    pub fn output(&self) -> Vec<f32> {
        let mut output = Vec::with_capacity(self.output_count);
        self.output_into(&mut output);
        output
    }

    pub fn output_into(&self, output: &mut Vec<f32>) {
        output.clear();
        let first = self.neurons.len() - self.output_count;
        output.extend(self.neurons[first..].iter().map(Neuron::effective_charge));
    }

    /// Deliver an axon's weights into its endpoint.
    pub(crate) fn emit(&mut self, axon: AxonId, now: Tick, candidates: &mut FireCandidates) -> Result<()> {
        let axon_ref = self
            .axons
            .get(axon.index())
            .ok_or(EngineError::UnknownAxon { axon })?;
        let endpoint = axon_ref.endpoint();
        let neuron = &mut self.neurons[endpoint.index()];
        if neuron.receive(axon_ref.weights(), now) {
            candidates.register(endpoint);
        }
        if neuron_trace_cfg().traces(endpoint) {
            trace!(
                "[NETWORK] tick={} {} delivered {:?} to {} -> charge {:?}",
                now,
                axon,
                axon_ref.weights(),
                endpoint,
                neuron.charge()
            );
        }
        Ok(())
    }

    /// Excite a neuron and schedule all of its outgoing axons.
    ///
    /// Returns false if the neuron already excited this tick.
    pub(crate) fn excite(
        &mut self,
        id: NeuronId,
        clock: ClockState,
        delay_line: &mut DelayLine,
    ) -> Result<bool> {
        let now = clock.time;
        let neuron = &mut self.neurons[id.index()];
        if !neuron.excite(now) {
            return Ok(false);
        }
        if neuron_trace_cfg().traces(id) {
            trace!(
                "[NETWORK] tick={} {} excited with charge {:?}",
                now,
                id,
                neuron.charge()
            );
        }
        for &axon in neuron.outgoing() {
            let delivery = self.axons[axon.index()].excite(now);
            delay_line.schedule(delivery, axon, clock)?;
        }
        Ok(true)
    }

    /// Excite the input axon with the given input number.
    pub(crate) fn excite_input(
        &mut self,
        index: usize,
        clock: ClockState,
        delay_line: &mut DelayLine,
    ) -> Result<EmitScheduling> {
        let axon = *self.inputs.get(index).ok_or(EngineError::InputOutOfRange {
            index,
            count: self.inputs.len(),
        })?;
        let delivery = self.axons[axon.index()].excite(clock.time);
        Ok(delay_line.schedule(delivery, axon, clock)?)
    }

    /// Decay every neuron up to `now`, registering those still at or above threshold.
    pub(crate) fn decay(&mut self, now: Tick, candidates: &mut FireCandidates) {
        let cfg = neuron_trace_cfg();
        for (index, neuron) in self.neurons.iter_mut().enumerate() {
            let id = NeuronId(index as u32);
            neuron.decay(now, cfg.traces(id));
            if neuron.is_above_threshold() {
                candidates.register(id);
            }
        }
    }

    /// Forward feedback to every non-input axon.
    pub(crate) fn process(&mut self, feedback: &dyn Feedback, now: Tick) -> Result<()> {
        for (index, axon) in self.axons.iter_mut().enumerate() {
            if axon.is_input() {
                continue;
            }
            axon.process(AxonId(index as u32), feedback, now)?;
        }
        Ok(())
    }
}
