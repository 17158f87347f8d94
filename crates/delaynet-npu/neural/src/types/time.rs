// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulation time and the constants bounding it

/// Discrete simulation time. Tick 0 is the first processed tick.
pub type Tick = i64;

/// Clock time before the first tick has started.
pub const UNSTARTED: Tick = -1;

/// Longest delay an axon may carry. Bounds the delay line depth.
pub const MAX_AXON_LENGTH: u32 = 1024;

/// Effective charge at or above which a neuron excites.
pub const EXCITATION_THRESHOLD: f32 = 1.0;
