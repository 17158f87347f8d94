// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Per-tick observable state and the feedback source contract

use delaynet_npu_neural::{ClockState, Feedback, Tick};
use serde::{Deserialize, Serialize};

/// Raised once per completed tick.
#[derive(Debug, Clone, Copy)]
pub struct TickEvent<'a> {
    pub time: Tick,
    pub emitting_axon_count: usize,
    pub excitation_count: usize,
    pub output: &'a [f32],
    pub stop: bool,
    pub feedback: Option<&'a dyn Feedback>,
}

impl TickEvent<'_> {
    pub fn summary(&self) -> TickSummary {
        TickSummary {
            time: self.time,
            emitting_axon_count: self.emitting_axon_count,
            excitation_count: self.excitation_count,
            output: self.output.to_vec(),
            stop: self.stop,
            had_feedback: self.feedback.is_some(),
        }
    }
}

/// Owned, serializable copy of a [`TickEvent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSummary {
    pub time: Tick,
    pub emitting_axon_count: usize,
    pub excitation_count: usize,
    pub output: Vec<f32>,
    pub stop: bool,
    pub had_feedback: bool,
}

pub type TickObserver = Box<dyn FnMut(&TickEvent<'_>)>;

/// External source of per-tick feedback.
///
/// Called with the output snapshot of the tick and the clock at that tick.
/// `None` means no adjustment this tick.
pub trait FeedbackSource {
    fn feedback(&mut self, output: &[f32], clock: ClockState) -> Option<Box<dyn Feedback>>;
}

impl<F> FeedbackSource for F
where
    F: FnMut(&[f32], ClockState) -> Option<Box<dyn Feedback>>,
{
    fn feedback(&mut self, output: &[f32], clock: ClockState) -> Option<Box<dyn Feedback>> {
        self(output, clock)
    }
}
