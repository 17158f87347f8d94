// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Core type definitions shared by every delaynet crate

pub mod connection;
pub mod error;
pub mod ids;
pub mod time;

pub use connection::{AxonSpec, Connection, NeuronRef};
pub use error::{ClockError, NeuralError, Result};
pub use ids::{AxonId, NeuronId};
pub use time::{Tick, EXCITATION_THRESHOLD, MAX_AXON_LENGTH, UNSTARTED};
