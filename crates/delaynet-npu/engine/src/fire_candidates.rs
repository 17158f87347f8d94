// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fire Candidate List (FCL) - neurons that may excite on the next evaluation
//!
//! Registration is idempotent: a neuron appears at most once per evaluation,
//! in first-registration order.

use delaynet_npu_neural::NeuronId;

#[derive(Debug, Clone, Default)]
pub struct FireCandidates {
    queue: Vec<NeuronId>,
    queued: Vec<bool>,
}

impl FireCandidates {
    pub fn new(neuron_count: usize) -> Self {
        Self {
            queue: Vec::with_capacity(neuron_count),
            queued: vec![false; neuron_count],
        }
    }

    /// Register every neuron (used before tick 0, when initial charges are unknown).
    pub fn all(neuron_count: usize) -> Self {
        Self {
            queue: (0..neuron_count as u32).map(NeuronId).collect(),
            queued: vec![true; neuron_count],
        }
    }

    /// Returns false if the neuron was already registered.
    #[inline]
    pub fn register(&mut self, id: NeuronId) -> bool {
        let index = id.index();
        if index >= self.queued.len() {
            self.queued.resize(index + 1, false);
        }
        if self.queued[index] {
            return false;
        }
        self.queued[index] = true;
        self.queue.push(id);
        true
    }

    pub fn contains(&self, id: NeuronId) -> bool {
        self.queued.get(id.index()).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NeuronId> + '_ {
        self.queue.iter().copied()
    }

    /// Remove and return all registered neurons, leaving the list empty.
    pub fn take(&mut self) -> Vec<NeuronId> {
        let taken = std::mem::take(&mut self.queue);
        for id in &taken {
            self.queued[id.index()] = false;
        }
        taken
    }

    pub fn clear(&mut self) {
        let _ = self.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let mut fcl = FireCandidates::new(4);
        assert!(fcl.register(NeuronId(2)));
        assert!(!fcl.register(NeuronId(2)));
        assert!(fcl.register(NeuronId(0)));
        assert_eq!(fcl.iter().collect::<Vec<_>>(), vec![NeuronId(2), NeuronId(0)]);
    }

    #[test]
    fn test_take_resets_membership() {
        let mut fcl = FireCandidates::all(3);
        assert_eq!(fcl.len(), 3);
        assert!(fcl.contains(NeuronId(1)));

        let taken = fcl.take();
        assert_eq!(taken.len(), 3);
        assert!(fcl.is_empty());
        assert!(!fcl.contains(NeuronId(1)));
        assert!(fcl.register(NeuronId(1)));
    }

    #[test]
    fn test_register_grows() {
        let mut fcl = FireCandidates::default();
        assert!(fcl.register(NeuronId(10)));
        assert!(fcl.contains(NeuronId(10)));
        fcl.clear();
        assert!(fcl.is_empty());
    }
}
