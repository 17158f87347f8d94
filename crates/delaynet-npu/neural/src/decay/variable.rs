// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Piecewise-constant decay tables
//!
//! A table is a list of `(max_dt, decay)` steps with strictly increasing
//! `max_dt`. The multiplier for an elapsed time `dt` is the `decay` of the
//! first step whose `max_dt >= dt`; past the last step the table's tail
//! value applies. `dt == 0` means "the event happened this tick" and yields 1
//! unless the table explicitly starts at `max_dt == 0`.

use serde::{Deserialize, Serialize};

use super::DecayStrategy;
use crate::types::{NeuralError, Result, Tick};

/// Tail multiplier once a neuron has gone quiet after receiving charge.
const NO_EXCITATION_TAIL: f32 = 0.0;

/// Tail multiplier once the last excitation is long past.
const EXCITATION_TAIL: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayStep {
    pub max_dt: Tick,
    pub decay: f32,
}

impl DecayStep {
    pub const fn new(max_dt: Tick, decay: f32) -> Self {
        Self { max_dt, decay }
    }
}

impl From<(Tick, f32)> for DecayStep {
    fn from((max_dt, decay): (Tick, f32)) -> Self {
        Self { max_dt, decay }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecayTable {
    steps: Vec<DecayStep>,
    tail: f32,
}

impl DecayTable {
    pub fn new(steps: Vec<DecayStep>, tail: f32) -> Result<Self> {
        let mut previous: Option<Tick> = None;
        for (index, step) in steps.iter().enumerate() {
            if step.max_dt < 0 {
                return Err(NeuralError::NegativeDecayInterval {
                    index,
                    max_dt: step.max_dt,
                });
            }
            if let Some(previous) = previous {
                if step.max_dt <= previous {
                    return Err(NeuralError::DecayIntervalsNotIncreasing {
                        index,
                        max_dt: step.max_dt,
                        previous,
                    });
                }
            }
            if step.decay.is_nan() {
                return Err(NeuralError::NaNDecay { index });
            }
            previous = Some(step.max_dt);
        }
        Ok(Self { steps, tail })
    }

    pub fn steps(&self) -> &[DecayStep] {
        &self.steps
    }

    pub fn tail(&self) -> f32 {
        self.tail
    }

    pub fn multiplier(&self, dt: Tick) -> f32 {
        if dt <= 0 {
            return match self.steps.first() {
                Some(first) if first.max_dt == 0 => first.decay,
                _ => 1.0,
            };
        }
        self.steps
            .iter()
            .find(|step| step.max_dt >= dt)
            .map_or(self.tail, |step| step.decay)
    }

    /// Per-tick multipliers for dt = 1, 2, 3, ...
    pub fn sequence(&self) -> impl Iterator<Item = f32> + '_ {
        (1..).map(move |dt| self.multiplier(dt))
    }

    /// Running product of [`DecayTable::sequence`]: the fraction of a unit
    /// charge left after each tick.
    pub fn cumulative_sequence(&self) -> impl Iterator<Item = f32> + '_ {
        self.sequence().scan(1.0_f32, |remaining, decay| {
            *remaining *= decay;
            Some(*remaining)
        })
    }
}

/// Decay type with separate tables before and after an excitation.
///
/// The table belonging to the most recent event is used: the excitation
/// table when the neuron excited at or after its last charge receipt,
/// otherwise the no-excitation table.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecay {
    no_excitation: DecayTable,
    excitation: DecayTable,
    initial_charge: f32,
}

impl VariableDecay {
    pub fn new(no_excitation: Vec<DecayStep>, excitation: Vec<DecayStep>) -> Result<Self> {
        Ok(Self {
            no_excitation: DecayTable::new(no_excitation, NO_EXCITATION_TAIL)?,
            excitation: DecayTable::new(excitation, EXCITATION_TAIL)?,
            initial_charge: 0.0,
        })
    }

    /// Build from `(max_dt, decay)` pairs.
    pub fn from_pairs(no_excitation: &[(Tick, f32)], excitation: &[(Tick, f32)]) -> Result<Self> {
        Self::new(
            no_excitation.iter().copied().map(DecayStep::from).collect(),
            excitation.iter().copied().map(DecayStep::from).collect(),
        )
    }

    pub fn with_initial_charge(mut self, charge: f32) -> Self {
        self.initial_charge = charge;
        self
    }

    pub fn no_excitation_table(&self) -> &DecayTable {
        &self.no_excitation
    }

    pub fn excitation_table(&self) -> &DecayTable {
        &self.excitation
    }
}

impl DecayStrategy for VariableDecay {
    fn decay(&self, since_charge: Option<Tick>, since_excitation: Option<Tick>) -> f32 {
        match (since_charge, since_excitation) {
            (Some(charge), Some(excitation)) if excitation > charge => {
                self.no_excitation.multiplier(charge)
            }
            (_, Some(excitation)) => self.excitation.multiplier(excitation),
            (Some(charge), None) => self.no_excitation.multiplier(charge),
            (None, None) => 0.0,
        }
    }

    fn initial_charge(&self) -> f32 {
        self.initial_charge
    }
}
