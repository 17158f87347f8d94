// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # delaynet
//!
//! Discrete-event simulation of spiking neurons connected by delayed,
//! weighted axons, with a feedback hook for learning.
//!
//! ## Quick Start
//!
//! ```rust
//! use delaynet::prelude::*;
//!
//! // Two inputs summed into one output neuron (an AND gate at weight 1/2)
//! let network = Network::create(
//!     vec![
//!         NeuronSpec::new(NoRetention),
//!         NeuronSpec::new(NoRetention),
//!         NeuronSpec::new(NoRetention),
//!     ],
//!     1,
//!     |from, to| match (from, to.0) {
//!         (NeuronRef::Input, 0 | 1) => Connection::Spec(AxonSpec::scalar(1, 1.0)),
//!         (NeuronRef::Index(NeuronId(0 | 1)), 2) => Connection::Spec(AxonSpec::scalar(1, 0.5)),
//!         _ => Connection::None,
//!     },
//! )?;
//!
//! let mut machine = Machine::new(network, Clock::bounded(2)?).with_feeder(UniformPrimer);
//! assert_eq!(machine.run(None)?, vec![1.0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Foundation: delaynet-config, delaynet-observability    │
//! │  (TOML settings, tracing subscriber)                    │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  NPU: delaynet-npu-neural                               │
//! │  (Clock, decay and weight strategies, feedback)         │
//! └─────────────────────────────────────────────────────────┘
//!                         ↓
//! ┌─────────────────────────────────────────────────────────┐
//! │  NPU: delaynet-npu-engine                               │
//! │  (Network, delay line, machine tick loop)               │
//! └─────────────────────────────────────────────────────────┘
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use delaynet_config as config;
pub use delaynet_npu_engine as engine;
pub use delaynet_npu_neural as neural;
pub use delaynet_observability as observability;

pub mod logging;
pub mod simulation;

pub use simulation::{Simulation, SimulationError, SimulationOutcome};

/// Prelude - commonly used types and traits
pub mod prelude {
    pub use crate::neural::{
        AlwaysOn, AxonId, AxonSpec, BasicFeedback, Clock, ClockState, Connection, DecayStep,
        DecayStrategy, Feedback, FixedWeights, FnWeightUpdate, NeuronId, NeuronRef, NoRetention,
        Tick, VariableDecay, WeightUpdateContext, WeightUpdateStrategy,
    };

    pub use crate::engine::{
        Blueprint, DeterministicFeeder, EmitScheduling, EngineError, Feeder, FeedbackSource,
        InputPort, Machine, MachineState, Network, NeuronSpec, RandomPrimer, TickEvent,
        TickSummary, UniformPrimer,
    };

    pub use crate::simulation::{Simulation, SimulationOutcome};
}
