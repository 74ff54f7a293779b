//! Shake detector: threshold plus debounce.
//!
//! ## Decision rule
//!
//! | Condition                                   | Decision    |
//! |---------------------------------------------|-------------|
//! | `force <= threshold` (or force is NaN)      | `Still`     |
//! | above threshold, `< cooldown` since accept  | `Debounced` |
//! | above threshold otherwise                   | `Shake`     |
//!
//! The last-accepted timestamp is updated *before* the caller gets the
//! [`ShakeEvent`], so a slow dispatch can never let a burst of samples
//! through.

use log::debug;

use crate::config::ShakeConfig;
use crate::sampler::AccelSample;

/// An accepted shake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEvent {
    /// Force of the triggering sample, in g.
    pub force_g: f32,
    /// Clock time the shake was accepted.
    pub at_ms: u64,
}

/// Outcome of feeding one sample to the detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeDecision {
    Still,
    /// Over threshold but inside the cooldown window.
    Debounced { force_g: f32, since_last_ms: u64 },
    Shake(ShakeEvent),
}

pub struct ShakeDetector {
    threshold_g: f32,
    cooldown_ms: u64,
    last_accepted_ms: Option<u64>,
    accepted: u32,
}

impl ShakeDetector {
    pub fn new(config: &ShakeConfig) -> Self {
        Self::with_limits(config.threshold_g, config.cooldown_ms)
    }

    pub fn with_limits(threshold_g: f32, cooldown_ms: u64) -> Self {
        Self {
            threshold_g,
            cooldown_ms,
            last_accepted_ms: None,
            accepted: 0,
        }
    }

    /// Classify `sample`, received at `now_ms`.
    pub fn process(&mut self, sample: AccelSample, now_ms: u64) -> ShakeDecision {
        let force_g = sample.force();
        if force_g.is_nan() || force_g <= self.threshold_g {
            return ShakeDecision::Still;
        }

        if let Some(last) = self.last_accepted_ms {
            let since_last_ms = now_ms.saturating_sub(last);
            if since_last_ms < self.cooldown_ms {
                debug!("Shake debounced ({:.2} g, {} ms since last)", force_g, since_last_ms);
                return ShakeDecision::Debounced {
                    force_g,
                    since_last_ms,
                };
            }
        }

        self.last_accepted_ms = Some(now_ms);
        self.accepted = self.accepted.saturating_add(1);
        ShakeDecision::Shake(ShakeEvent {
            force_g,
            at_ms: now_ms,
        })
    }

    /// Time of the last accepted shake.
    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    /// Shakes accepted since construction.
    pub fn accepted_count(&self) -> u32 {
        self.accepted
    }
}
