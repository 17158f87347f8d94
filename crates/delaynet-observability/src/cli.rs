// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-delaynet-npu-engine` to raise one crate to
//! debug level, and `--debug-all` for every known crate.

use std::collections::HashMap;
use std::env;

use crate::KNOWN_CRATES;

/// Per-crate debug switches
///
/// # Example
/// ```rust
/// use delaynet_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-delaynet-npu-engine".to_string()]);
/// assert!(flags.is_enabled("delaynet-npu-engine"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: HashMap<String, bool>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate-name}` and `--debug-all` arguments. Anything
    /// else is ignored.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enable(crate_name);
            }
        }
        flags
    }

    pub fn enable(&mut self, crate_name: &str) {
        self.enabled_crates.insert(crate_name.to_string(), true);
    }

    pub fn enable_all(&mut self) {
        for crate_name in KNOWN_CRATES {
            self.enable(crate_name);
        }
    }

    /// Check if debug is enabled for a specific crate
    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.get(crate_name).copied().unwrap_or(false)
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled_crates.values().any(|on| *on)
    }

    /// `DEBUG` if enabled, `INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directives with `info` as the default level.
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with("info")
    }

    /// `EnvFilter` directives for the enabled crates on top of `default_level`.
    ///
    /// Tracing targets use the module path, so `delaynet-npu-engine` becomes
    /// `delaynet_npu_engine=debug`.
    pub fn to_filter_string_with(&self, default_level: &str) -> String {
        let mut targets: Vec<String> = self
            .enabled_crates
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| format!("{}=debug", name.replace('-', "_")))
            .collect();
        targets.sort();
        targets.insert(0, default_level.to_string());
        targets.join(",")
    }
}

/// Parse debug flags from the process arguments and `DELAYNET_DEBUG`.
///
/// `DELAYNET_DEBUG` holds comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var("DELAYNET_DEBUG") {
        apply_env_value(&mut flags, &value);
    }
    flags
}

fn apply_env_value(flags: &mut CrateDebugFlags, value: &str) {
    if value.trim() == "all" {
        flags.enable_all();
        return;
    }
    for crate_name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
        flags.enable(crate_name);
    }
}

/// Help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variables:
  DELAYNET_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  DELAYNET_DEBUG=all                               Enable debug for all crates
  DELAYNET_TRACE_NEURONS=all|{{index}}[,{{index}}]   Trace decay and excitation of neurons
"#,
        KNOWN_CRATES.join(", ")
    )
}
