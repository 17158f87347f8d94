// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! Structs that map to the sections of `delaynet.toml`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DelaynetConfig {
    pub simulation: SimulationConfig,
    pub logging: LoggingSettings,
}

/// How inputs are excited before tick 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimerKind {
    /// No input is excited
    None,
    /// Every input is excited once
    #[default]
    Uniform,
    /// Each input is excited with probability 1/2, seeded by `simulation.seed`
    Random,
}

impl FromStr for PrimerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "uniform" => Ok(Self::Uniform),
            "random" => Ok(Self::Random),
            other => Err(ConfigError::InvalidValue(format!(
                "primer must be one of none|uniform|random, got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for PrimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Uniform => "uniform",
            Self::Random => "random",
        };
        f.write_str(name)
    }
}

/// Simulation run settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Clock bound; `None` leaves the clock unbounded
    pub max_time: Option<i64>,
    pub primer: PrimerKind,
    pub seed: u64,
    /// Keep every tick's output instead of only the last one
    pub collect_outputs: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_time: Some(100),
            primer: PrimerKind::Uniform,
            seed: 0,
            collect_outputs: false,
        }
    }
}

/// `[logging]` section as written in the file.
///
/// Kept as plain strings so validation can report every bad value at once;
/// `delaynet-observability` turns it into a subscriber configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    /// `text` or `json`
    pub format: String,
    /// Crates to raise to debug level (e.g. `delaynet-npu-engine`)
    pub debug_crates: Vec<String>,
    /// Base folder for rolling log files (needs the `file-logging` feature)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            debug_crates: Vec::new(),
            log_dir: None,
        }
    }
}
