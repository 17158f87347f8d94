// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Bridge from the `[logging]` section of `delaynet.toml` to the subscriber.

use anyhow::Result;
use delaynet_config::LoggingSettings;
use delaynet_observability::{init_logging, parse_debug_flags, CrateDebugFlags, LoggingConfig, LoggingGuard};

/// Subscriber configuration for a `[logging]` section.
///
/// # Errors
/// Fails if `format` is not `text` or `json`.
pub fn logging_config(settings: &LoggingSettings) -> Result<LoggingConfig> {
    let config = LoggingConfig::from_parts(&settings.level, &settings.format)?;
    Ok(match &settings.log_dir {
        Some(dir) => config.with_log_dir(dir.clone()),
        None => config,
    })
}

/// Command-line and `DELAYNET_DEBUG` flags plus the section's `debug_crates`.
pub fn debug_flags(settings: &LoggingSettings) -> CrateDebugFlags {
    let mut flags = parse_debug_flags();
    for crate_name in &settings.debug_crates {
        flags.enable(crate_name);
    }
    flags
}

/// Install the global subscriber described by a `[logging]` section.
pub fn init_from_settings(settings: &LoggingSettings) -> Result<LoggingGuard> {
    init_logging(&logging_config(settings)?, &debug_flags(settings))
}
