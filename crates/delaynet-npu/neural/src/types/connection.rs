// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Wiring vocabulary: where an axon starts and what it looks like

use std::fmt;
use std::sync::Arc;

use super::error::{NeuralError, Result};
use super::ids::NeuronId;
use super::time::MAX_AXON_LENGTH;
use crate::weights::{FixedWeights, WeightUpdateStrategy};

/// Origin of an axon: another neuron, or the external input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeuronRef {
    Input,
    Index(NeuronId),
}

impl NeuronRef {
    pub fn neuron(self) -> Option<NeuronId> {
        match self {
            NeuronRef::Input => None,
            NeuronRef::Index(id) => Some(id),
        }
    }

    pub fn is_input(self) -> bool {
        matches!(self, NeuronRef::Input)
    }
}

impl From<NeuronId> for NeuronRef {
    fn from(id: NeuronId) -> Self {
        NeuronRef::Index(id)
    }
}

impl fmt::Display for NeuronRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeuronRef::Input => write!(f, "Input"),
            NeuronRef::Index(id) => write!(f, "{}", id),
        }
    }
}

/// Axon description returned by a wiring function.
#[derive(Clone)]
pub struct AxonSpec {
    pub length: u32,
    pub weights: Vec<f32>,
    pub update: Arc<dyn WeightUpdateStrategy>,
}

impl AxonSpec {
    /// Axon whose weights never change.
    pub fn new(length: u32, weights: Vec<f32>) -> Self {
        Self {
            length,
            weights,
            update: Arc::new(FixedWeights),
        }
    }

    /// Single-channel axon.
    pub fn scalar(length: u32, weight: f32) -> Self {
        Self::new(length, vec![weight])
    }

    pub fn with_update(mut self, update: Arc<dyn WeightUpdateStrategy>) -> Self {
        self.update = update;
        self
    }

    /// Validate length bounds and weight contents.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 || self.length > MAX_AXON_LENGTH {
            return Err(NeuralError::InvalidAxonLength {
                length: self.length,
                max: MAX_AXON_LENGTH,
            });
        }
        if self.weights.is_empty() {
            return Err(NeuralError::EmptyWeights);
        }
        if let Some(index) = self.weights.iter().position(|w| w.is_nan()) {
            return Err(NeuralError::NaNWeight { index });
        }
        Ok(())
    }
}

impl fmt::Debug for AxonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxonSpec")
            .field("length", &self.length)
            .field("weights", &self.weights)
            .field("update", &self.update)
            .finish()
    }
}

/// Answer of a wiring function for one ordered pair.
#[derive(Debug, Clone, Default)]
pub enum Connection {
    #[default]
    None,
    Spec(AxonSpec),
}

impl From<Option<AxonSpec>> for Connection {
    fn from(spec: Option<AxonSpec>) -> Self {
        match spec {
            Some(spec) => Connection::Spec(spec),
            None => Connection::None,
        }
    }
}
