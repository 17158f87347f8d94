// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Simulation Clock
//!
//! Monotonic integer time source. Starts at [`UNSTARTED`], moves to tick 0 on
//! [`Clock::start`] and then only by exactly one per [`Clock::increment`].
//! A bounded clock never moves past its `max_time`.
//!
//! [`Clock::ticks`] hands out the tick sequence once; a started clock cannot
//! produce a second sequence.

use core::iter::FusedIterator;
use serde::{Deserialize, Serialize};

use crate::types::{ClockError, Tick, UNSTARTED};

/// Read-only copy of a clock's position, handed to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockState {
    pub time: Tick,
    pub max_time: Option<Tick>,
}

impl ClockState {
    pub fn is_started(&self) -> bool {
        self.time != UNSTARTED
    }

    /// True if `time` lies beyond the bound (never true for unbounded clocks).
    pub fn is_beyond_bound(&self, time: Tick) -> bool {
        self.max_time.is_some_and(|max| time > max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clock {
    time: Tick,
    max_time: Option<Tick>,
}

impl Clock {
    pub fn new(max_time: Option<Tick>) -> Result<Self, ClockError> {
        if let Some(max_time) = max_time {
            if max_time <= 0 {
                return Err(ClockError::InvalidBound { max_time });
            }
        }
        Ok(Self {
            time: UNSTARTED,
            max_time,
        })
    }

    pub fn unbounded() -> Self {
        Self {
            time: UNSTARTED,
            max_time: None,
        }
    }

    pub fn bounded(max_time: Tick) -> Result<Self, ClockError> {
        Self::new(Some(max_time))
    }

    #[inline]
    pub fn time(&self) -> Tick {
        self.time
    }

    #[inline]
    pub fn max_time(&self) -> Option<Tick> {
        self.max_time
    }

    pub fn is_started(&self) -> bool {
        self.time != UNSTARTED
    }

    pub fn state(&self) -> ClockState {
        ClockState {
            time: self.time,
            max_time: self.max_time,
        }
    }

    /// Move from [`UNSTARTED`] to tick 0.
    pub fn start(&mut self) -> Result<Tick, ClockError> {
        if self.is_started() {
            return Err(ClockError::AlreadyStarted { time: self.time });
        }
        self.time = 0;
        Ok(self.time)
    }

    /// Advance by one tick.
    pub fn increment(&mut self) -> Result<Tick, ClockError> {
        if !self.is_started() {
            return Err(ClockError::NotStarted);
        }
        if let Some(max_time) = self.max_time {
            if self.time >= max_time {
                return Err(ClockError::MaxTimeReached { max_time });
            }
        }
        self.time += 1;
        Ok(self.time)
    }

    /// Single-pass tick sequence. Starts the clock on first iteration and
    /// advances it on each following one. Ends when a bound is reached.
    pub fn ticks(&mut self) -> Result<Ticks<'_>, ClockError> {
        if self.is_started() {
            return Err(ClockError::AlreadyStarted { time: self.time });
        }
        Ok(Ticks {
            clock: self,
            primed: false,
        })
    }
}

/// Iterator returned by [`Clock::ticks`].
#[derive(Debug)]
pub struct Ticks<'a> {
    clock: &'a mut Clock,
    primed: bool,
}

impl Iterator for Ticks<'_> {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if !self.primed {
            self.primed = true;
            return self.clock.start().ok();
        }
        let time = self.clock.increment().ok()?;
        match self.clock.max_time {
            Some(max_time) if time >= max_time => None,
            _ => Some(time),
        }
    }
}

impl FusedIterator for Ticks<'_> {}
