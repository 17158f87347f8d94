// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Decay Strategies
//!
//! A neuron "type" is its decay strategy: a function of the time since the
//! neuron last received charge and the time since it last excited, returning
//! the multiplier applied to its charge for one tick.
//!
//! ## Contract
//! - At least one of the two elapsed times is `Some`. A neuron that never
//!   received charge and never excited decays to 0 without consulting the
//!   strategy.
//! - Elapsed times are measured at the tick being decayed, so an event at
//!   tick `t` reads as 0 when tick `t` itself is decayed.
//!
//! ## Available types
//! - [`NoRetention`]: loses all charge after one tick
//! - [`AlwaysOn`]: bias neuron, starts charged and never decays
//! - [`VariableDecay`]: piecewise-constant decay tables

mod fixed;
mod variable;

pub use fixed::{AlwaysOn, NoRetention};
pub use variable::{DecayStep, DecayTable, VariableDecay};

use core::fmt::Debug;

use crate::types::Tick;

pub trait DecayStrategy: Debug + Send + Sync {
    /// Multiplier for one tick of decay.
    fn decay(&self, since_charge: Option<Tick>, since_excitation: Option<Tick>) -> f32;

    /// Per-channel multipliers. Defaults to [`DecayStrategy::decay`] on every channel.
    fn decay_channels(
        &self,
        since_charge: Option<Tick>,
        since_excitation: Option<Tick>,
        multipliers: &mut [f32],
    ) {
        multipliers.fill(self.decay(since_charge, since_excitation));
    }

    /// Charge a neuron of this type holds before tick 0.
    fn initial_charge(&self) -> f32 {
        0.0
    }
}
