// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for delaynet
//!
//! Console output in text or JSON, plus (with `file-logging`) a rolling JSON
//! log file in a timestamped run folder:
//! ```text
//! <log_dir>/
//!   └── run_20250101_120000/
//!       └── delaynet.log.2025-01-01
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps file writers alive; logs are flushed when dropped.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder of the log files, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// `EnvFilter` directives for the configured level and the debug flags.
///
/// # Errors
/// Fails if the level is not a valid level name.
pub fn filter_directives(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<String> {
    let level = LevelFilter::from_str(&config.level)
        .with_context(|| format!("Invalid log level '{}'", config.level))?;
    Ok(debug_flags.to_filter_string_with(&level.to_string().to_ascii_lowercase()))
}

fn build_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("Invalid log filter '{}'", directives))
}

/// Install the global subscriber.
///
/// # Errors
/// Fails on an invalid level, if the log folder cannot be created, or if a
/// global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig, debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    let directives = filter_directives(config, debug_flags)?;
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console: BoxedLayer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_filter(build_filter(&directives)?)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(build_filter(&directives)?)
            .boxed(),
    };
    layers.push(console);

    #[cfg(feature = "file-logging")]
    let (file_guards, log_dir) = match &config.log_dir {
        Some(base) => {
            let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
            let run_folder = base.join(format!("run_{}", timestamp));
            std::fs::create_dir_all(&run_folder)
                .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

            let appender = tracing_appender::rolling::daily(&run_folder, "delaynet.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(build_filter(&directives)?)
                    .boxed(),
            );
            (vec![guard], Some(run_folder))
        }
        None => (Vec::new(), None),
    };
    #[cfg(not(feature = "file-logging"))]
    let log_dir: Option<PathBuf> = None;

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    if cfg!(not(feature = "file-logging")) && config.log_dir.is_some() {
        tracing::warn!("[OBSERVABILITY] log_dir is set but file-logging is not compiled in");
    }
    tracing::debug!("[OBSERVABILITY] Logging initialized with filter '{}'", directives);

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
        log_dir,
    })
}

/// Initialize console logging at `info` with the given debug flags
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(&LoggingConfig::default(), debug_flags)
}
