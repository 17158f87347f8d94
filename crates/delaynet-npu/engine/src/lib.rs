// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # delaynet Engine
//!
//! Discrete-event simulation of spiking neurons joined by delayed,
//! weighted axons.
//!
//! ## Architecture
//! - **Network**: arena of neurons and axons, built from a wiring function
//! - **DelayLine**: ring buffer of pending deliveries, one slot per tick
//! - **FireCandidates**: neurons to evaluate at the next excitation step
//! - **Machine**: the single-shot tick loop, feedback hook and observers
//! - **Feeders**: input primers invoked before tick 0 and after every tick
//!
//! ## Example
//! ```rust
//! use delaynet_npu_engine::{Machine, Network, NeuronSpec, UniformPrimer};
//! use delaynet_npu_neural::{AxonSpec, Clock, Connection, NeuronRef, NoRetention};
//!
//! let network = Network::create(vec![NeuronSpec::new(NoRetention)], 1, |from, _| match from {
//!     NeuronRef::Input => Connection::Spec(AxonSpec::scalar(1, 1.0)),
//!     NeuronRef::Index(_) => Connection::None,
//! })?;
//! let mut machine = Machine::new(network, Clock::unbounded()).with_feeder(UniformPrimer);
//! assert_eq!(machine.run(Some(1))?, vec![1.0]);
//! # Ok::<(), delaynet_npu_engine::EngineError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod axon;
pub mod blueprint;
pub mod delay_line;
pub mod error;
pub mod feeder;
pub mod fire_candidates;
pub mod machine;
pub mod network;
pub mod neuron;
pub mod tick;

mod trace;

pub use axon::Axon;
pub use blueprint::Blueprint;
pub use delay_line::{DelayLine, EmitScheduling};
pub use error::{EngineError, FeederError, Result, ScheduleError};
pub use feeder::{DeterministicFeeder, Feeder, InputPort, RandomPrimer, UniformPrimer};
pub use fire_candidates::FireCandidates;
pub use machine::{Machine, MachineState, MachineStats};
pub use network::Network;
pub use neuron::{Neuron, NeuronSpec};
pub use tick::{FeedbackSource, TickEvent, TickObserver, TickSummary};
