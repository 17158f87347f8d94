// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Settings are resolved in three tiers:
//! 1. TOML file (base values, missing keys fall back to defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{ConfigError, ConfigResult, DelaynetConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "delaynet.toml";

/// Find the delaynet configuration file
///
/// Search order:
/// 1. `DELAYNET_CONFIG_PATH` environment variable
/// 2. Current working directory: `./delaynet.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("DELAYNET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by DELAYNET_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            let Some(parent) = current.parent() else {
                break;
            };
            search_paths.push(parent.join(CONFIG_FILE_NAME));
            current = parent;
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet DELAYNET_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides keyed by `section.field`
///
/// # Errors
///
/// Returns error if the file is not found, contains invalid TOML, or an
/// override carries an unparsable value
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<DelaynetConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: DelaynetConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `DELAYNET_MAX_TIME` -> `simulation.max_time` (`none` for unbounded)
/// - `DELAYNET_PRIMER` -> `simulation.primer`
/// - `DELAYNET_SEED` -> `simulation.seed`
/// - `DELAYNET_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut DelaynetConfig) -> ConfigResult<()> {
    if let Ok(value) = env::var("DELAYNET_MAX_TIME") {
        config.simulation.max_time = parse_max_time(&value)?;
    }
    if let Ok(value) = env::var("DELAYNET_PRIMER") {
        config.simulation.primer = value.parse()?;
    }
    if let Ok(value) = env::var("DELAYNET_SEED") {
        config.simulation.seed = parse_seed(&value)?;
    }
    if let Ok(value) = env::var("DELAYNET_LOG_LEVEL") {
        config.logging.level = value;
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
///
/// Recognized keys: `simulation.max_time`, `simulation.primer`,
/// `simulation.seed`, `logging.level`. Other keys are ignored.
pub fn apply_cli_overrides(
    config: &mut DelaynetConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    if let Some(value) = cli_args.get("simulation.max_time") {
        config.simulation.max_time = parse_max_time(value)?;
    }
    if let Some(value) = cli_args.get("simulation.primer") {
        config.simulation.primer = value.parse()?;
    }
    if let Some(value) = cli_args.get("simulation.seed") {
        config.simulation.seed = parse_seed(value)?;
    }
    if let Some(value) = cli_args.get("logging.level") {
        config.logging.level = value.clone();
    }
    Ok(())
}

fn parse_max_time(value: &str) -> ConfigResult<Option<i64>> {
    if value.eq_ignore_ascii_case("none") || value.eq_ignore_ascii_case("unbounded") {
        return Ok(None);
    }
    value
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue(format!("max_time must be an integer, got '{}'", value)))
}

fn parse_seed(value: &str) -> ConfigResult<u64> {
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidValue(format!("seed must be an unsigned integer, got '{}'", value)))
}
