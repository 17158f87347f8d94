// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Config-driven machine construction
//!
//! [`Simulation`] turns the `[simulation]` section of `delaynet.toml` into a
//! ready [`Machine`]: the clock bound comes from `max_time` and the input
//! feeder from `primer` and `seed`.

use std::collections::HashMap;
use std::path::Path;

use delaynet_config::{
    load_config, validate_config, ConfigError, DelaynetConfig, PrimerKind, SimulationConfig,
};
use delaynet_npu_engine::{
    Blueprint, EngineError, Feeder, Machine, MachineState, MachineStats, Network, RandomPrimer,
    UniformPrimer,
};
use delaynet_npu_neural::{Clock, Tick};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Result of a config-driven run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    /// Every tick's output with `collect_outputs`, otherwise only the last one
    pub outputs: Vec<Vec<f32>>,
    pub state: MachineState,
    pub stats: MachineStats,
    pub final_time: Tick,
}

impl SimulationOutcome {
    pub fn last_output(&self) -> Option<&[f32]> {
        self.outputs.last().map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &DelaynetConfig) -> Self {
        Self::new(config.simulation.clone())
    }

    /// Load and validate `delaynet.toml` (see [`load_config`] for the lookup order).
    pub fn load(config_path: Option<&Path>, cli_args: Option<&HashMap<String, String>>) -> Result<Self> {
        let config = load_config(config_path, cli_args)?;
        validate_config(&config)?;
        Ok(Self::from_config(&config))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> Result<Clock> {
        Ok(Clock::new(self.config.max_time).map_err(EngineError::from)?)
    }

    /// Feeder selected by `primer`; `None` for [`PrimerKind::None`].
    pub fn feeder(&self) -> Option<Box<dyn Feeder>> {
        match self.config.primer {
            PrimerKind::None => None,
            PrimerKind::Uniform => Some(Box::new(UniformPrimer)),
            PrimerKind::Random => Some(Box::new(RandomPrimer::new(self.config.seed))),
        }
    }

    /// Machine for `network` with the configured clock and primer.
    pub fn build(&self, network: Network) -> Result<Machine> {
        let mut machine = Machine::new(network, self.clock()?);
        if let Some(feeder) = self.feeder() {
            machine.set_feeder(feeder);
        }
        debug!(
            "[SIMULATION] Built machine: max_time={:?} primer={}",
            self.config.max_time, self.config.primer
        );
        Ok(machine)
    }

    /// Machine for a blueprint. The blueprint's own feeder takes precedence
    /// over the configured primer.
    pub fn build_blueprint<B: Blueprint + ?Sized>(&self, blueprint: &B) -> Result<Machine> {
        let mut machine = Machine::new(blueprint.network()?, self.clock()?);
        if let Some(feeder) = blueprint.feeder().or_else(|| self.feeder()) {
            machine.set_feeder(feeder);
        }
        if let Some(source) = blueprint.feedback_source() {
            machine.set_feedback(source);
        }
        Ok(machine)
    }

    /// Build and run to the clock bound.
    pub fn run(&self, network: Network) -> Result<SimulationOutcome> {
        let machine = self.build(network)?;
        self.run_machine(machine, None)
    }

    /// Run a prepared machine (observers attached, inputs primed) up to
    /// `limit`, or the clock bound when `limit` is `None`.
    pub fn run_machine(&self, mut machine: Machine, limit: Option<Tick>) -> Result<SimulationOutcome> {
        let outputs = if self.config.collect_outputs {
            machine.run_collect(limit)?
        } else {
            vec![machine.run(limit)?]
        };
        let outcome = SimulationOutcome {
            outputs,
            state: machine.state(),
            stats: machine.stats(),
            final_time: machine.clock().time(),
        };
        info!(
            "[SIMULATION] Finished in state {:?} at tick {} ({} excitations)",
            outcome.state, outcome.final_time, outcome.stats.excitations
        );
        Ok(outcome)
    }
}
