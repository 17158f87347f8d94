// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Engine error taxonomy
//!
//! Every error is a logic or configuration defect surfaced at the point of
//! violation. Nothing here is transient or retryable.

use delaynet_npu_neural::{AxonId, ClockError, NeuralError, Tick};

/// Scheduling invariant violations on the delay line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("instantaneous delivery of {axon} at tick {time}")]
    InstantaneousDelivery { axon: AxonId, time: Tick },

    #[error("delivery of {axon} at tick {delivery_time} is in the past (now={current_time})")]
    DeliveryInPast {
        axon: AxonId,
        delivery_time: Tick,
        current_time: Tick,
    },

    #[error("delivery of {axon} {offset} ticks ahead exceeds delay line depth {depth}")]
    BeyondHorizon {
        axon: AxonId,
        offset: Tick,
        depth: usize,
    },
}

/// Deterministic feeder contract violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FeederError {
    #[error("feeder invoked out of tick order: expected tick {expected}, got {actual}")]
    OutOfOrder { expected: Tick, actual: Tick },

    #[error("feed row {row} has {actual} entries but the network has {expected} inputs")]
    InputCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Neural(#[from] NeuralError),

    #[error(transparent)]
    Clock(#[from] ClockError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Feeder(#[from] FeederError),

    #[error("output count {output_count} exceeds neuron count {neuron_count}")]
    OutputCountExceedsNeurons {
        output_count: usize,
        neuron_count: usize,
    },

    #[error("duplicate neuron label '{label}'")]
    DuplicateLabel { label: String },

    #[error("input {index} out of range ({count} inputs)")]
    InputOutOfRange { index: usize, count: usize },

    #[error("unknown axon {axon}")]
    UnknownAxon { axon: AxonId },

    #[error("feedback cannot adjust input axon {axon}")]
    InputAxonFeedback { axon: AxonId },

    #[error("machine has already run")]
    AlreadyRun,

    #[error("run needs a bound: neither the clock nor the call limits it")]
    UnboundedRun,

    #[error("run limit {requested} exceeds clock bound {max_time}")]
    RunLimitExceedsClock { requested: Tick, max_time: Tick },
}

pub type Result<T> = core::result::Result<T, EngineError>;
