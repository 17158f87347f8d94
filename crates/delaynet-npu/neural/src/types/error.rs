// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for construction-time contract checks and clock lifecycle

use super::time::Tick;

/// Construction-time contract violations. Never recoverable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NeuralError {
    #[error("axon length {length} outside 1..={max}")]
    InvalidAxonLength { length: u32, max: u32 },

    #[error("axon weight vector is empty")]
    EmptyWeights,

    #[error("axon weight {index} is NaN")]
    NaNWeight { index: usize },

    #[error("decay step {index} has negative max_dt {max_dt}")]
    NegativeDecayInterval { index: usize, max_dt: Tick },

    #[error("decay step {index} max_dt {max_dt} does not increase on previous {previous}")]
    DecayIntervalsNotIncreasing {
        index: usize,
        max_dt: Tick,
        previous: Tick,
    },

    #[error("decay step {index} multiplier is NaN")]
    NaNDecay { index: usize },
}

/// Clock lifecycle violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    #[error("clock bound must be > 0, got {max_time}")]
    InvalidBound { max_time: Tick },

    #[error("clock already started (time={time})")]
    AlreadyStarted { time: Tick },

    #[error("clock not started")]
    NotStarted,

    #[error("max time reached: {max_time}")]
    MaxTimeReached { max_time: Tick },
}

pub type Result<T> = core::result::Result<T, NeuralError>;
