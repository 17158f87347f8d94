// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Axon
//!
//! Delayed, weighted link into a destination neuron. Exciting an axon
//! schedules one delivery `length` ticks later and folds the gap between
//! deliveries into a running mean. The last delivery time is kept after
//! emission so feedback can measure the time since the last excitation.

use std::sync::Arc;

use delaynet_npu_neural::{
    AxonId, AxonSpec, Feedback, NeuronId, NeuronRef, Result as NeuralResult, Tick,
    WeightUpdateContext, WeightUpdateStrategy,
};

use crate::error::{EngineError, Result};

#[derive(Debug, Clone)]
pub struct Axon {
    length: u32,
    weights: Vec<f32>,
    startpoint: NeuronRef,
    endpoint: NeuronId,
    time_of_delivery: Option<Tick>,
    excitation_count: u64,
    average_time_between_excitations: Option<f32>,
    /// `None` for input axons: feedback never adjusts injected weights.
    update: Option<Arc<dyn WeightUpdateStrategy>>,
}

impl Axon {
    pub(crate) fn new(spec: AxonSpec, startpoint: NeuronRef, endpoint: NeuronId) -> NeuralResult<Self> {
        spec.validate()?;
        Ok(Self {
            length: spec.length,
            weights: spec.weights,
            startpoint,
            endpoint,
            time_of_delivery: None,
            excitation_count: 0,
            average_time_between_excitations: None,
            update: (!startpoint.is_input()).then_some(spec.update),
        })
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn startpoint(&self) -> NeuronRef {
        self.startpoint
    }

    pub fn endpoint(&self) -> NeuronId {
        self.endpoint
    }

    pub fn is_input(&self) -> bool {
        self.startpoint.is_input()
    }

    pub fn time_of_delivery(&self) -> Option<Tick> {
        self.time_of_delivery
    }

    pub fn excitation_count(&self) -> u64 {
        self.excitation_count
    }

    pub fn average_time_between_excitations(&self) -> Option<f32> {
        self.average_time_between_excitations
    }

    /// `time - time_of_delivery - length`, or `None` if never excited.
    pub fn time_since_last_excitation(&self, time: Tick) -> Option<Tick> {
        self.time_of_delivery
            .map(|delivery| time - delivery - Tick::from(self.length))
    }

    /// Schedule the next delivery; returns its tick.
    pub(crate) fn excite(&mut self, current_time: Tick) -> Tick {
        self.excitation_count += 1;
        let delivery = current_time + Tick::from(self.length);

        self.average_time_between_excitations = Some(
            match (self.average_time_between_excitations, self.time_of_delivery) {
                (Some(average), Some(previous)) => {
                    let n = self.excitation_count as f32;
                    (average * (n - 1.0) + (delivery - previous) as f32) / n
                }
                _ => (current_time + 1) as f32,
            },
        );
        self.time_of_delivery = Some(delivery);
        delivery
    }

    /// Hand the weights to the weight update strategy.
    pub(crate) fn process(&mut self, id: AxonId, feedback: &dyn Feedback, time: Tick) -> Result<()> {
        let Some(update) = self.update.as_ref() else {
            return Err(EngineError::InputAxonFeedback { axon: id });
        };
        let context = WeightUpdateContext {
            time,
            time_since_last_excitation: self.time_since_last_excitation(time),
            average_time_between_excitations: self.average_time_between_excitations,
            excitation_count: self.excitation_count,
            feedback,
            startpoint: self.startpoint,
            endpoint: self.endpoint,
        };
        update.update_weights(&mut self.weights, &context);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delaynet_npu_neural::{BasicFeedback, FnWeightUpdate, NeuralError};
    use std::sync::Mutex;

    fn internal(spec: AxonSpec) -> Axon {
        Axon::new(spec, NeuronRef::Index(NeuronId(0)), NeuronId(1)).unwrap()
    }

    #[test]
    fn test_construction_validates() {
        assert!(matches!(
            Axon::new(AxonSpec::scalar(0, 1.0), NeuronRef::Input, NeuronId(0)),
            Err(NeuralError::InvalidAxonLength { .. })
        ));
        assert!(matches!(
            Axon::new(AxonSpec::new(2, vec![f32::NAN]), NeuronRef::Input, NeuronId(0)),
            Err(NeuralError::NaNWeight { index: 0 })
        ));
    }

    #[test]
    fn test_excite_schedules_and_averages() {
        let mut axon = internal(AxonSpec::scalar(3, 1.0));
        assert_eq!(axon.average_time_between_excitations(), None);

        assert_eq!(axon.excite(2), 5);
        assert_eq!(axon.excitation_count(), 1);
        assert_eq!(axon.average_time_between_excitations(), Some(3.0));

        // gap 4: (3*1 + 4) / 2
        assert_eq!(axon.excite(6), 9);
        assert_eq!(axon.average_time_between_excitations(), Some(3.5));

        // gap 2: (3.5*2 + 2) / 3
        assert_eq!(axon.excite(8), 11);
        assert_eq!(axon.average_time_between_excitations(), Some(3.0));
        assert_eq!(axon.time_of_delivery(), Some(11));
    }

    #[test]
    fn test_time_since_last_excitation() {
        let mut axon = internal(AxonSpec::scalar(2, 1.0));
        assert_eq!(axon.time_since_last_excitation(10), None);
        axon.excite(3);
        assert_eq!(axon.time_since_last_excitation(7), Some(0));
        assert_eq!(axon.time_since_last_excitation(9), Some(2));
    }

    #[test]
    fn test_process_passes_statistics() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let strategy = FnWeightUpdate::new("record", move |weights: &mut [f32], ctx: &WeightUpdateContext<'_>| {
            sink.lock().unwrap().push((
                weights.len(),
                ctx.time_since_last_excitation,
                ctx.excitation_count,
                ctx.endpoint,
            ));
            weights[1] += 1.0;
        });
        let mut axon = internal(AxonSpec::new(1, vec![0.5, 0.5]).with_update(Arc::new(strategy)));
        axon.excite(0);

        axon.process(AxonId(7), &BasicFeedback::proceed(), 4).unwrap();

        assert_eq!(axon.weights(), &[0.5, 1.5]);
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            &[(2, Some(2), 1, NeuronId(1))]
        );
    }

    #[test]
    fn test_input_axon_rejects_feedback() {
        let mut axon = Axon::new(AxonSpec::scalar(1, 1.0), NeuronRef::Input, NeuronId(0)).unwrap();
        assert!(axon.is_input());
        assert_eq!(
            axon.process(AxonId(0), &BasicFeedback::proceed(), 0),
            Err(EngineError::InputAxonFeedback { axon: AxonId(0) })
        );
    }
}
