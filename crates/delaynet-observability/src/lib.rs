// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # delaynet-observability
//!
//! Logging infrastructure shared by the delaynet binaries and tests.
//!
//! Library crates only emit through the `tracing` facade; this crate
//! installs the subscriber, with per-crate debug flag support.
//!
//! ## Features
//! - `file-logging`: rolling log files in a timestamped run folder

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod init;

pub use cli::*;
pub use config::*;
pub use init::*;

/// Known delaynet crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "delaynet",
    "delaynet-npu-neural",
    "delaynet-npu-engine",
    "delaynet-config",
    "delaynet-observability",
];
