// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Machine
//!
//! Single-shot scheduler that owns a network, its clock and the delay line.
//!
//! ## Tick order
//! 1. Deliver every axon due this tick
//! 2. Snapshot the output
//! 3. Ask the feedback source (if any)
//! 4. Apply feedback to axon weights and read its stop flag
//! 5. Excite every registered neuron still at or above threshold
//! 6. Decay all neurons, registering candidates for the next tick
//! 7. Run the feeder, recycle the delay line slot, advance the clock
//! 8. Notify observers; end the run if feedback asked to stop
//!
//! Before tick 0 every neuron is registered as a candidate (initial charges
//! are not known to the scheduler) and the feeder runs once.

use delaynet_npu_neural::{AxonId, Clock, ClockState, Tick};
use tracing::{debug, info, trace};

use crate::delay_line::{DelayLine, EmitScheduling};
use crate::error::{EngineError, Result};
use crate::feeder::{Feeder, InputPort};
use crate::fire_candidates::FireCandidates;
use crate::network::Network;
use crate::tick::{FeedbackSource, TickEvent, TickObserver};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    NotStarted,
    Running,
    /// Feedback asked to stop.
    Stopped,
    /// The run limit was reached.
    Exhausted,
    /// An error ended the run.
    Faulted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineStats {
    pub ticks: u64,
    pub deliveries: u64,
    pub excitations: u64,
    pub feedback_count: u64,
}

pub struct Machine {
    clock: Clock,
    core: MachineCore,
    state: MachineState,
}

/// Everything but the clock, so the tick iterator can borrow the clock
/// while a tick mutates the rest.
struct MachineCore {
    network: Network,
    delay_line: DelayLine,
    candidates: FireCandidates,
    feeder: Option<Box<dyn Feeder>>,
    feedback: Option<Box<dyn FeedbackSource>>,
    observers: Vec<TickObserver>,
    output: Vec<f32>,
    stats: MachineStats,
}

impl Machine {
    pub fn new(network: Network, clock: Clock) -> Self {
        let candidates = FireCandidates::all(network.neuron_count());
        Self {
            clock,
            core: MachineCore {
                output: Vec::with_capacity(network.output_count()),
                network,
                delay_line: DelayLine::new(),
                candidates,
                feeder: None,
                feedback: None,
                observers: Vec::new(),
                stats: MachineStats::default(),
            },
            state: MachineState::NotStarted,
        }
    }

    pub fn with_feeder(mut self, feeder: impl Feeder + 'static) -> Self {
        self.set_feeder(Box::new(feeder));
        self
    }

    pub fn with_feedback(mut self, source: impl FeedbackSource + 'static) -> Self {
        self.set_feedback(Box::new(source));
        self
    }

    pub fn set_feeder(&mut self, feeder: Box<dyn Feeder>) {
        self.core.feeder = Some(feeder);
    }

    pub fn set_feedback(&mut self, source: Box<dyn FeedbackSource>) {
        self.core.feedback = Some(source);
    }

    /// Subscribe to tick-completed notifications.
    pub fn on_tick(&mut self, observer: impl FnMut(&TickEvent<'_>) + 'static) {
        self.core.observers.push(Box::new(observer));
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn network(&self) -> &Network {
        &self.core.network
    }

    pub fn delay_line(&self) -> &DelayLine {
        &self.core.delay_line
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn stats(&self) -> MachineStats {
        self.core.stats
    }

    /// Excite an input axon at the current time (before the run: lands on tick 0).
    pub fn excite(&mut self, input_index: usize) -> Result<EmitScheduling> {
        let clock = self.clock.state();
        let core = &mut self.core;
        InputPort::new(&mut core.network, &mut core.delay_line, clock).excite(input_index)
    }

    /// Put an axon delivery on the delay line.
    pub fn schedule_emit(&mut self, delivery_time: Tick, axon: AxonId) -> Result<EmitScheduling> {
        if self.core.network.axon(axon).is_none() {
            return Err(EngineError::UnknownAxon { axon });
        }
        Ok(self
            .core
            .delay_line
            .schedule(delivery_time, axon, self.clock.state())?)
    }

    /// Run to the limit (or until feedback stops it) and return the last output.
    ///
    /// A limit of zero or less runs no tick; the output is then read straight
    /// from the network.
    pub fn run(&mut self, max_time: Option<Tick>) -> Result<Vec<f32>> {
        let mut last = self.core.network.output();
        self.run_with(max_time, |output| {
            last.clear();
            last.extend_from_slice(output);
        })?;
        Ok(last)
    }

    /// Run and return every tick's output.
    pub fn run_collect(&mut self, max_time: Option<Tick>) -> Result<Vec<Vec<f32>>> {
        let mut outputs = Vec::new();
        self.run_with(max_time, |output| outputs.push(output.to_vec()))?;
        Ok(outputs)
    }

    fn run_with(&mut self, max_time: Option<Tick>, mut sink: impl FnMut(&[f32])) -> Result<()> {
        if self.state != MachineState::NotStarted {
            return Err(EngineError::AlreadyRun);
        }
        let limit = match (self.clock.max_time(), max_time) {
            (None, None) => return Err(EngineError::UnboundedRun),
            (Some(clock_max), Some(requested)) if requested > clock_max => {
                return Err(EngineError::RunLimitExceedsClock {
                    requested,
                    max_time: clock_max,
                })
            }
            (_, Some(requested)) => requested,
            (Some(clock_max), None) => clock_max,
        };

        self.state = MachineState::Running;
        info!(
            "[MACHINE] Run started: limit={} neurons={} inputs={} outputs={}",
            limit,
            self.core.network.neuron_count(),
            self.core.network.input_count(),
            self.core.network.output_count()
        );

        match self.drive(limit, &mut sink) {
            Ok(stopped) => {
                self.state = if stopped {
                    MachineState::Stopped
                } else {
                    MachineState::Exhausted
                };
                info!(
                    "[MACHINE] Run {} at tick {} ({} ticks, {} deliveries, {} excitations)",
                    if stopped { "stopped by feedback" } else { "exhausted" },
                    self.clock.time(),
                    self.core.stats.ticks,
                    self.core.stats.deliveries,
                    self.core.stats.excitations
                );
                Ok(())
            }
            Err(e) => {
                self.state = MachineState::Faulted;
                debug!("[MACHINE] Run faulted at tick {}: {}", self.clock.time(), e);
                Err(e)
            }
        }
    }

    /// Returns true if feedback stopped the run.
    fn drive(&mut self, limit: Tick, sink: &mut dyn FnMut(&[f32])) -> Result<bool> {
        self.core.feed(self.clock.state())?;

        let max_time = self.clock.max_time();
        for time in self.clock.ticks()? {
            if time >= limit {
                break;
            }
            if self.core.step(ClockState { time, max_time }, sink)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl MachineCore {
    fn feed(&mut self, clock: ClockState) -> Result<()> {
        if let Some(feeder) = self.feeder.as_mut() {
            let mut port = InputPort::new(&mut self.network, &mut self.delay_line, clock);
            feeder.feed(&mut port)?;
        }
        Ok(())
    }

    /// Process one tick. Returns the stop flag.
    fn step(&mut self, clock: ClockState, sink: &mut dyn FnMut(&[f32])) -> Result<bool> {
        let now = clock.time;

        // 1. Deliveries
        let due = self.delay_line.take_due();
        for &axon in &due {
            self.network.emit(axon, now, &mut self.candidates)?;
        }

        // 2. Output snapshot
        self.network.output_into(&mut self.output);
        sink(&self.output);

        // 3-4. Feedback
        let feedback = self
            .feedback
            .as_mut()
            .and_then(|source| source.feedback(&self.output, clock));
        let mut stop = false;
        if let Some(feedback) = feedback.as_deref() {
            self.network.process(feedback, now)?;
            stop = feedback.stop();
            self.stats.feedback_count += 1;
        }

        // 5. Excitation
        let mut excitations = 0;
        for id in self.candidates.take() {
            let above = self
                .network
                .neuron(id)
                .is_some_and(|neuron| neuron.is_above_threshold());
            if above && self.network.excite(id, clock, &mut self.delay_line)? {
                excitations += 1;
            }
        }

        // 6. Decay
        self.network.decay(now, &mut self.candidates);

        // 7. Feed, recycle
        if !stop {
            self.feed(clock)?;
        }
        let emitting_axon_count = due.len();
        self.delay_line.recycle(due);

        self.stats.ticks += 1;
        self.stats.deliveries += emitting_axon_count as u64;
        self.stats.excitations += excitations as u64;
        trace!(
            "[MACHINE] tick={} delivered={} excited={} output={:?} stop={}",
            now,
            emitting_axon_count,
            excitations,
            self.output,
            stop
        );

        // 8. Notify
        let event = TickEvent {
            time: now,
            emitting_axon_count,
            excitation_count: excitations,
            output: &self.output,
            stop,
            feedback: feedback.as_deref(),
        };
        for observer in &mut self.observers {
            observer(&event);
        }

        Ok(stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neuron::NeuronSpec;
    use delaynet_npu_neural::{AxonSpec, Connection, NeuronRef, NoRetention};

    fn single_neuron() -> Network {
        Network::create(vec![NeuronSpec::new(NoRetention)], 1, |from, _| match from {
            NeuronRef::Input => Connection::Spec(AxonSpec::scalar(1, 1.0)),
            _ => Connection::None,
        })
        .unwrap()
    }

    #[test]
    fn test_new_machine_registers_all_neurons() {
        let machine = Machine::new(single_neuron(), Clock::unbounded());
        assert_eq!(machine.state(), MachineState::NotStarted);
        assert_eq!(machine.core.candidates.len(), 1);
    }

    #[test]
    fn test_excite_before_run_lands_on_tick_zero() {
        let mut machine = Machine::new(single_neuron(), Clock::unbounded());
        assert_eq!(machine.excite(0), Ok(EmitScheduling::Queued));
        assert_eq!(machine.delay_line().due_in(0).len(), 1);
        assert!(matches!(
            machine.excite(3),
            Err(EngineError::InputOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_stats_accumulate() {
        let mut machine = Machine::new(single_neuron(), Clock::bounded(3).unwrap());
        machine.excite(0).unwrap();
        machine.run(None).unwrap();
        let stats = machine.stats();
        assert_eq!(stats.ticks, 3);
        assert_eq!(stats.deliveries, 1);
        assert_eq!(stats.excitations, 1);
        assert_eq!(stats.feedback_count, 0);
        assert_eq!(machine.state(), MachineState::Exhausted);
    }

    #[test]
    fn test_zero_limit_keeps_output_width() {
        let mut machine = Machine::new(single_neuron(), Clock::unbounded());
        machine.excite(0).unwrap();
        assert_eq!(machine.run(Some(0)).unwrap(), vec![0.0]);
        assert_eq!(machine.stats().ticks, 0);
        assert_eq!(machine.state(), MachineState::Exhausted);
    }

    #[test]
    fn test_negative_limit_keeps_output_width() {
        let mut machine = Machine::new(single_neuron(), Clock::bounded(3).unwrap());
        assert_eq!(machine.run(Some(-5)).unwrap(), vec![0.0]);
        assert_eq!(machine.stats().ticks, 0);

        let mut machine = Machine::new(single_neuron(), Clock::bounded(3).unwrap());
        assert!(machine.run_collect(Some(-5)).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_axon_rejected() {
        let mut machine = Machine::new(single_neuron(), Clock::unbounded());
        assert_eq!(
            machine.schedule_emit(1, AxonId(42)),
            Err(EngineError::UnknownAxon { axon: AxonId(42) })
        );
    }
}
