// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logic gate demo runner.
//!
//! Loads `delaynet.toml` (falling back to defaults if none is found), wires
//! a small gate network and prints one JSON tick summary per line.
//!
//! ```text
//! run_gate [--gate and|xor|not] [--inputs 1,0] [--config <path>]
//!          [--set section.key=value]... [--debug-<crate>|--debug-all]
//! ```

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use delaynet::config::{find_config_file, load_config, validate_config, DelaynetConfig};
use delaynet::logging::init_from_settings;
use delaynet::observability::debug_flags_help;
use delaynet::prelude::*;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    And,
    Xor,
    Not,
}

struct Args {
    gate: Gate,
    inputs: Vec<bool>,
    config_path: Option<PathBuf>,
    overrides: HashMap<String, String>,
}

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: run_gate [--gate and|xor|not] [--inputs <bits>] [--config <path>] [--set key=value]\n\n\
         Defaults:\n\
         - gate: and\n\
         - inputs: 1,1 (and/xor: one pair; not: one bit per tick)\n\n{}",
        debug_flags_help()
    );
    process::exit(2);
}

fn parse_bits(value: &str) -> Result<Vec<bool>> {
    value
        .split(',')
        .map(|bit| match bit.trim() {
            "1" | "t" | "true" => Ok(true),
            "0" | "f" | "false" => Ok(false),
            other => bail!("invalid input bit '{}'", other),
        })
        .collect()
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        gate: Gate::And,
        inputs: vec![true, true],
        config_path: None,
        overrides: HashMap::new(),
    };

    let mut argv = env::args().skip(1);
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--gate" => {
                args.gate = match argv.next().as_deref() {
                    Some("and") => Gate::And,
                    Some("xor") => Gate::Xor,
                    Some("not") => Gate::Not,
                    _ => usage_and_exit(),
                }
            }
            "--inputs" => {
                let value = argv.next().unwrap_or_else(|| usage_and_exit());
                args.inputs = parse_bits(&value)?;
            }
            "--config" => {
                let value = argv.next().unwrap_or_else(|| usage_and_exit());
                args.config_path = Some(PathBuf::from(value));
            }
            "--set" => {
                let value = argv.next().unwrap_or_else(|| usage_and_exit());
                let Some((key, val)) = value.split_once('=') else {
                    bail!("--set expects key=value, got '{}'", value);
                };
                args.overrides.insert(key.to_string(), val.to_string());
            }
            "-h" | "--help" => usage_and_exit(),
            // Consumed by parse_debug_flags
            other if other.starts_with("--debug-") => {}
            other => {
                eprintln!("Unknown argument: {other}");
                usage_and_exit();
            }
        }
    }

    let expected = match args.gate {
        Gate::And | Gate::Xor => Some(2),
        Gate::Not => None,
    };
    if let Some(expected) = expected {
        if args.inputs.len() != expected {
            bail!("{:?} takes {} input bits, got {}", args.gate, expected, args.inputs.len());
        }
    }
    Ok(args)
}

fn load(args: &Args) -> Result<DelaynetConfig> {
    let path = match &args.config_path {
        Some(path) => Some(path.clone()),
        None => find_config_file().ok(),
    };
    let config = match path {
        Some(path) => load_config(Some(&path), Some(&args.overrides))
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let mut config = DelaynetConfig::default();
            delaynet::config::apply_environment_overrides(&mut config)?;
            delaynet::config::apply_cli_overrides(&mut config, &args.overrides)?;
            config
        }
    };
    validate_config(&config)?;
    Ok(config)
}

/// AND, XOR and NOT wired as one blueprint.
struct GateBlueprint {
    gate: Gate,
    inputs: Vec<bool>,
}

impl Blueprint for GateBlueprint {
    fn neurons(&self) -> Vec<NeuronSpec> {
        match self.gate {
            Gate::And | Gate::Xor => vec![
                NeuronSpec::new(NoRetention).labeled("a"),
                NeuronSpec::new(NoRetention).labeled("b"),
                NeuronSpec::new(NoRetention).labeled("out"),
            ],
            Gate::Not => vec![
                NeuronSpec::new(AlwaysOn).labeled("bias"),
                NeuronSpec::new(NoRetention).labeled("out"),
            ],
        }
    }

    fn output_count(&self) -> usize {
        1
    }

    fn connection(&self, from: NeuronRef, to: NeuronId) -> Connection {
        let spec = match (self.gate, from, to.0) {
            (Gate::And | Gate::Xor, NeuronRef::Input, 0 | 1) => Some(AxonSpec::scalar(1, 1.0)),
            (Gate::And, NeuronRef::Index(NeuronId(0 | 1)), 2) => Some(AxonSpec::scalar(1, 0.5)),
            (Gate::Xor, NeuronRef::Index(NeuronId(0)), 2) => Some(AxonSpec::scalar(1, 1.0)),
            (Gate::Xor, NeuronRef::Index(NeuronId(1)), 2) => Some(AxonSpec::scalar(1, -1.0)),
            (Gate::Not, NeuronRef::Input, 1) => Some(AxonSpec::scalar(1, -1.0)),
            (Gate::Not, NeuronRef::Index(NeuronId(0)), 1) => Some(AxonSpec::scalar(1, 1.0)),
            _ => None,
        };
        spec.into()
    }

    fn feeder(&self) -> Option<Box<dyn Feeder>> {
        let rows = match self.gate {
            Gate::And | Gate::Xor => vec![self.inputs.clone()],
            Gate::Not => self.inputs.iter().map(|bit| vec![*bit]).collect(),
        };
        Some(Box::new(DeterministicFeeder::new(rows)))
    }
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let config = load(&args)?;

    let _guard = init_from_settings(&config.logging)?;

    let blueprint = GateBlueprint {
        gate: args.gate,
        inputs: args.inputs.clone(),
    };
    // and/xor: inputs arrive at tick 0, the sum at tick 1. not: one tick per row
    let ticks = match args.gate {
        Gate::And | Gate::Xor => 2,
        Gate::Not => args.inputs.len() as Tick,
    };
    let limit = match config.simulation.max_time {
        Some(max_time) if max_time < ticks => {
            warn!("[RUN-GATE] max_time {} cuts the run short of {} ticks", max_time, ticks);
            max_time
        }
        _ => ticks,
    };

    let simulation = Simulation::from_config(&config);
    let mut machine = simulation.build_blueprint(&blueprint)?;
    machine.on_tick(|event| match serde_json::to_string(&event.summary()) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!("[RUN-GATE] Failed to serialize tick {}: {}", event.time, e),
    });

    info!("[RUN-GATE] Running {:?} on {:?} for {} ticks", args.gate, args.inputs, limit);
    let outcome = simulation.run_machine(machine, Some(limit))?;
    info!(
        "[RUN-GATE] Output {:?} after {} ticks",
        outcome.last_output().unwrap_or_default(),
        outcome.stats.ticks
    );
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("run_gate: {e:#}");
        process::exit(1);
    }
}
