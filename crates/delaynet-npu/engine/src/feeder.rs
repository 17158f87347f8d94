// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Input Feeders
//!
//! A feeder is invoked once before tick 0 (clock unstarted, so its
//! excitations land on tick 0) and once at the end of every tick (so its
//! excitations land on the next tick at the earliest). It drives the
//! network only through an [`InputPort`].

use delaynet_npu_neural::{ClockState, Tick, UNSTARTED};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::delay_line::{DelayLine, EmitScheduling};
use crate::error::{FeederError, Result};
use crate::network::Network;

/// Write access to a network's inputs for one invocation.
pub struct InputPort<'a> {
    network: &'a mut Network,
    delay_line: &'a mut DelayLine,
    clock: ClockState,
}

impl<'a> InputPort<'a> {
    pub(crate) fn new(network: &'a mut Network, delay_line: &'a mut DelayLine, clock: ClockState) -> Self {
        Self {
            network,
            delay_line,
            clock,
        }
    }

    pub fn input_count(&self) -> usize {
        self.network.input_count()
    }

    pub fn time(&self) -> Tick {
        self.clock.time
    }

    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub fn excite(&mut self, index: usize) -> Result<EmitScheduling> {
        self.network
            .excite_input(index, self.clock, self.delay_line)
    }
}

pub trait Feeder {
    fn feed(&mut self, port: &mut InputPort<'_>) -> Result<()>;
}

/// Excites every input once, before tick 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPrimer;

impl Feeder for UniformPrimer {
    fn feed(&mut self, port: &mut InputPort<'_>) -> Result<()> {
        if port.time() != UNSTARTED {
            return Ok(());
        }
        for index in 0..port.input_count() {
            port.excite(index)?;
        }
        Ok(())
    }
}

/// Excites each input with probability 1/2, once, before tick 0.
#[derive(Debug, Clone)]
pub struct RandomPrimer {
    rng: StdRng,
}

impl RandomPrimer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Feeder for RandomPrimer {
    fn feed(&mut self, port: &mut InputPort<'_>) -> Result<()> {
        if port.time() != UNSTARTED {
            return Ok(());
        }
        for index in 0..port.input_count() {
            if self.rng.gen_bool(0.5) {
                port.excite(index)?;
            }
        }
        Ok(())
    }
}

/// One row of input flags per tick, starting with the pre-start tick.
///
/// Rows past the end excite nothing.
#[derive(Debug, Clone)]
pub struct DeterministicFeeder {
    rows: Vec<Vec<bool>>,
    next_time: Tick,
}

impl DeterministicFeeder {
    pub fn new(rows: Vec<Vec<bool>>) -> Self {
        Self {
            rows,
            next_time: UNSTARTED,
        }
    }

    /// A single row applied before tick 0.
    pub fn once(row: Vec<bool>) -> Self {
        Self::new(vec![row])
    }
}

impl Feeder for DeterministicFeeder {
    fn feed(&mut self, port: &mut InputPort<'_>) -> Result<()> {
        let time = port.time();
        if time != self.next_time {
            return Err(FeederError::OutOfOrder {
                expected: self.next_time,
                actual: time,
            }
            .into());
        }
        self.next_time += 1;

        let row_index = (time - UNSTARTED) as usize;
        let Some(row) = self.rows.get(row_index) else {
            return Ok(());
        };
        if row.len() != port.input_count() {
            return Err(FeederError::InputCountMismatch {
                row: row_index,
                expected: port.input_count(),
                actual: row.len(),
            }
            .into());
        }
        trace!("[FEEDER] tick={} row={} {:?}", time, row_index, row);
        for (index, _) in row.iter().enumerate().filter(|(_, on)| **on) {
            port.excite(index)?;
        }
        Ok(())
    }
}
