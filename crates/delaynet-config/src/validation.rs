// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Checks that values are in range and consistent with each other. All
//! problems are collected and reported together.

use crate::{ConfigError, ConfigResult, DelaynetConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    NonPositiveMaxTime { max_time: i64 },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveMaxTime { max_time } => {
                write!(f, "simulation.max_time = {} must be positive", max_time)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &DelaynetConfig) -> ConfigResult<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        return Ok(());
    }

    let error_messages = errors
        .iter()
        .map(|e| format!("  - {}", e))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::ValidationError(format!(
        "Configuration validation failed:\n{}",
        error_messages
    )))
}

fn collect_errors(config: &DelaynetConfig) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();
    validate_simulation(config, &mut errors);
    validate_logging(config, &mut errors);
    errors
}

fn validate_simulation(config: &DelaynetConfig, errors: &mut Vec<ConfigValidationError>) {
    let simulation = &config.simulation;
    if let Some(max_time) = simulation.max_time {
        if max_time <= 0 {
            errors.push(ConfigValidationError::NonPositiveMaxTime { max_time });
        }
    }
    if simulation.max_time.is_none() && simulation.collect_outputs {
        errors.push(ConfigValidationError::InvalidValue {
            field: "simulation.collect_outputs".to_string(),
            reason: "collecting outputs needs a bounded clock".to_string(),
        });
    }
}

fn validate_logging(config: &DelaynetConfig, errors: &mut Vec<ConfigValidationError>) {
    let logging = &config.logging;
    if !LOG_LEVELS.contains(&logging.level.to_ascii_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {}", logging.level, LOG_LEVELS.join("|")),
        });
    }
    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.format".to_string(),
            reason: format!("'{}' is not one of {}", logging.format, LOG_FORMATS.join("|")),
        });
    }
    for name in &logging.debug_crates {
        if !name.starts_with("delaynet") {
            errors.push(ConfigValidationError::InvalidValue {
                field: "logging.debug_crates".to_string(),
                reason: format!("'{}' is not a delaynet crate", name),
            });
        }
    }
}
