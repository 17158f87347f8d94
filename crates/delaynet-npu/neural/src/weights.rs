// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Weight Update Strategies
//!
//! An axon "type" is its weight update strategy. When a tick produces
//! feedback, every non-input axon hands its weight vector to its strategy
//! together with its timing statistics; the strategy edits the weights in
//! place.

use core::fmt;

use crate::feedback::Feedback;
use crate::types::{NeuronId, NeuronRef, Tick};

/// Everything an axon knows about itself when feedback arrives.
#[derive(Debug, Clone, Copy)]
pub struct WeightUpdateContext<'a> {
    /// Tick being processed.
    pub time: Tick,
    /// `time - time_of_delivery - length`; `None` if the axon never excited.
    pub time_since_last_excitation: Option<Tick>,
    /// Running mean of delivery gaps; `None` if the axon never excited.
    pub average_time_between_excitations: Option<f32>,
    pub excitation_count: u64,
    pub feedback: &'a dyn Feedback,
    pub startpoint: NeuronRef,
    pub endpoint: NeuronId,
}

pub trait WeightUpdateStrategy: fmt::Debug + Send + Sync {
    fn update_weights(&self, weights: &mut [f32], context: &WeightUpdateContext<'_>);
}

/// Weights never change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedWeights;

impl WeightUpdateStrategy for FixedWeights {
    #[inline]
    fn update_weights(&self, _weights: &mut [f32], _context: &WeightUpdateContext<'_>) {}
}

/// Closure-backed strategy.
pub struct FnWeightUpdate<F> {
    name: &'static str,
    update: F,
}

impl<F> FnWeightUpdate<F>
where
    F: Fn(&mut [f32], &WeightUpdateContext<'_>) + Send + Sync,
{
    pub fn new(name: &'static str, update: F) -> Self {
        Self { name, update }
    }
}

impl<F> fmt::Debug for FnWeightUpdate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnWeightUpdate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<F> WeightUpdateStrategy for FnWeightUpdate<F>
where
    F: Fn(&mut [f32], &WeightUpdateContext<'_>) + Send + Sync,
{
    fn update_weights(&self, weights: &mut [f32], context: &WeightUpdateContext<'_>) {
        (self.update)(weights, context)
    }
}
