// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Constant decay types

use super::DecayStrategy;
use crate::types::Tick;

/// Keeps no charge across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoRetention;

impl DecayStrategy for NoRetention {
    #[inline]
    fn decay(&self, _since_charge: Option<Tick>, _since_excitation: Option<Tick>) -> f32 {
        0.0
    }
}

/// Bias neuron: charged from the start, never decays, so it excites every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysOn;

impl DecayStrategy for AlwaysOn {
    #[inline]
    fn decay(&self, _since_charge: Option<Tick>, _since_excitation: Option<Tick>) -> f32 {
        1.0
    }

    fn initial_charge(&self) -> f32 {
        1.0
    }
}
