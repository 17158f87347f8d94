// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime-gated per-neuron tracing.
//!
//! Enable with:
//! - DELAYNET_TRACE_NEURONS=all
//! - DELAYNET_TRACE_NEURONS=0,4,17 (neuron indices)

use std::sync::OnceLock;

use delaynet_npu_neural::NeuronId;

#[derive(Debug, Default)]
pub(crate) struct NeuronTraceCfg {
    all: bool,
    neurons: Vec<u32>,
}

impl NeuronTraceCfg {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") || value.trim() == "1" {
            return Self {
                all: true,
                neurons: Vec::new(),
            };
        }
        Self {
            all: false,
            neurons: value
                .split(',')
                .filter_map(|v| v.trim().parse().ok())
                .collect(),
        }
    }

    #[inline]
    pub(crate) fn traces(&self, id: NeuronId) -> bool {
        self.all || self.neurons.contains(&id.0)
    }
}

pub(crate) fn neuron_trace_cfg() -> &'static NeuronTraceCfg {
    static CFG: OnceLock<NeuronTraceCfg> = OnceLock::new();
    CFG.get_or_init(|| {
        std::env::var("DELAYNET_TRACE_NEURONS")
            .ok()
            .as_deref()
            .map(NeuronTraceCfg::parse)
            .unwrap_or_default()
    })
}
