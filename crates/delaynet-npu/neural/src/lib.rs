// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # delaynet Neural Types
//!
//! The leaf layer of the discrete-event engine:
//! - **Types**: time (`Tick`), identifiers, graph references, errors
//! - **Clock**: monotonic, optionally bounded tick source
//! - **Decay**: per neuron-type charge decay strategies
//! - **Weights**: per axon-type weight update strategies
//! - **Feedback**: the opaque per-tick learning signal
//!
//! Nothing in this crate schedules or owns a graph; see `delaynet-npu-engine`.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod clock;
pub mod decay;
pub mod feedback;
pub mod types;
pub mod weights;

pub use clock::{Clock, ClockState, Ticks};
pub use decay::{AlwaysOn, DecayStep, DecayStrategy, DecayTable, NoRetention, VariableDecay};
pub use feedback::{BasicFeedback, Feedback};
pub use types::{
    AxonId, AxonSpec, ClockError, Connection, NeuralError, NeuronId, NeuronRef, Result, Tick,
    EXCITATION_THRESHOLD, MAX_AXON_LENGTH, UNSTARTED,
};
pub use weights::{FixedWeights, FnWeightUpdate, WeightUpdateContext, WeightUpdateStrategy};
