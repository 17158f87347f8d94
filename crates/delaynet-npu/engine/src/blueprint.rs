// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Network factories
//!
//! A [`Blueprint`] describes a network declaratively and builds a ready
//! [`Machine`] from it.

use delaynet_npu_neural::{Clock, Connection, NeuronId, NeuronRef, Tick};

use crate::error::Result;
use crate::feeder::Feeder;
use crate::machine::Machine;
use crate::network::Network;
use crate::neuron::NeuronSpec;
use crate::tick::FeedbackSource;

pub trait Blueprint {
    fn neurons(&self) -> Vec<NeuronSpec>;

    fn output_count(&self) -> usize;

    fn connection(&self, from: NeuronRef, to: NeuronId) -> Connection;

    fn feeder(&self) -> Option<Box<dyn Feeder>> {
        None
    }

    fn feedback_source(&self) -> Option<Box<dyn FeedbackSource>> {
        None
    }

    fn network(&self) -> Result<Network> {
        Network::create(self.neurons(), self.output_count(), |from, to| {
            self.connection(from, to)
        })
    }

    fn build(&self, max_time: Option<Tick>) -> Result<Machine> {
        let mut machine = Machine::new(self.network()?, Clock::new(max_time)?);
        if let Some(feeder) = self.feeder() {
            machine.set_feeder(feeder);
        }
        if let Some(source) = self.feedback_source() {
            machine.set_feedback(source);
        }
        Ok(machine)
    }
}
