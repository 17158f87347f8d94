// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Opaque per-tick learning signal
//!
//! The engine only reads [`Feedback::stop`]. Weight update strategies that
//! understand a concrete feedback type recover it with
//! [`downcast_ref`](trait.Feedback.html#method.downcast_ref).

use core::any::Any;
use core::fmt::Debug;

pub trait Feedback: Any + Debug {
    /// Ask the machine to end the run once the current tick completes.
    fn stop(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Feedback + 'a {
    pub fn downcast_ref<T: Feedback>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Feedback carrying nothing but the stop flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicFeedback {
    pub stop: bool,
}

impl BasicFeedback {
    pub fn proceed() -> Self {
        Self { stop: false }
    }

    pub fn halt() -> Self {
        Self { stop: true }
    }
}

impl Feedback for BasicFeedback {
    fn stop(&self) -> bool {
        self.stop
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Reward(f32);

    impl Feedback for Reward {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn test_basic_feedback_stop() {
        assert!(!BasicFeedback::proceed().stop());
        assert!(BasicFeedback::halt().stop());
    }

    #[test]
    fn test_downcast() {
        let feedback: Box<dyn Feedback> = Box::new(Reward(0.5));
        assert!(!feedback.stop());
        assert_eq!(feedback.downcast_ref::<Reward>().map(|r| r.0), Some(0.5));
        assert!(feedback.downcast_ref::<BasicFeedback>().is_none());
    }
}
