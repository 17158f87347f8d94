// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! DelayLine - fixed-depth ring buffer of pending axon deliveries.
//!
//! Key semantics:
//! - Slot `head` always holds the deliveries due at the current tick
//!   (tick 0 while the clock is unstarted).
//! - A delivery `dt` ticks ahead lands in slot `(head + dt) % depth`.
//! - Depth is `MAX_AXON_LENGTH + 1`, so every legal axon delay fits.
//! - Deliveries past the clock bound are dropped; everything else that is
//!   not strictly in the future is an error.

use delaynet_npu_neural::{AxonId, ClockState, Tick, MAX_AXON_LENGTH};
use tracing::trace;

use crate::error::ScheduleError;

/// Outcome of a successful scheduling request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitScheduling {
    Queued,
    /// Delivery falls beyond the clock bound and will never be needed.
    Dropped,
}

#[derive(Debug, Clone)]
pub struct DelayLine {
    slots: Vec<Vec<AxonId>>,
    head: usize,
    pending: usize,
}

impl Default for DelayLine {
    fn default() -> Self {
        Self::with_depth(MAX_AXON_LENGTH as usize + 1)
    }
}

impl DelayLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring of `depth` slots; a delivery may be at most `depth - 1` ticks ahead.
    pub fn with_depth(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            slots: vec![Vec::new(); depth],
            head: 0,
            pending: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Deliveries scheduled and not yet taken.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending == 0
    }

    /// Deliveries `offset` ticks from the current one.
    pub fn due_in(&self, offset: usize) -> &[AxonId] {
        if offset >= self.depth() {
            return &[];
        }
        &self.slots[(self.head + offset) % self.depth()]
    }

    pub fn schedule(
        &mut self,
        delivery_time: Tick,
        axon: AxonId,
        clock: ClockState,
    ) -> Result<EmitScheduling, ScheduleError> {
        if delivery_time < 0 {
            return Err(ScheduleError::DeliveryInPast {
                axon,
                delivery_time,
                current_time: clock.time,
            });
        }
        if clock.is_beyond_bound(delivery_time) {
            trace!(
                "[DELAY-LINE] Dropping {} at tick {} (bound {:?})",
                axon,
                delivery_time,
                clock.max_time
            );
            return Ok(EmitScheduling::Dropped);
        }

        let offset = delivery_time - clock.time.max(0);
        if offset == 0 && clock.is_started() {
            return Err(ScheduleError::InstantaneousDelivery {
                axon,
                time: delivery_time,
            });
        }
        if offset < 0 {
            return Err(ScheduleError::DeliveryInPast {
                axon,
                delivery_time,
                current_time: clock.time,
            });
        }
        if offset >= self.depth() as Tick {
            return Err(ScheduleError::BeyondHorizon {
                axon,
                offset,
                depth: self.depth(),
            });
        }

        let slot = (self.head + offset as usize) % self.depth();
        self.slots[slot].push(axon);
        self.pending += 1;
        Ok(EmitScheduling::Queued)
    }

    /// Take the deliveries due this tick. Hand the buffer back with
    /// [`DelayLine::recycle`] once they are emitted.
    pub fn take_due(&mut self) -> Vec<AxonId> {
        let due = std::mem::take(&mut self.slots[self.head]);
        self.pending -= due.len();
        due
    }

    /// Return the current slot's buffer (cleared) and advance one tick.
    pub fn recycle(&mut self, mut buffer: Vec<AxonId>) {
        buffer.clear();
        // Zero-offset scheduling is rejected once started, so the slot is still empty
        debug_assert!(self.slots[self.head].is_empty());
        self.slots[self.head] = buffer;
        self.head = (self.head + 1) % self.depth();
    }
}
