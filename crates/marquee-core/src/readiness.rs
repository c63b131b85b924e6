// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Image Readiness Tracker.
//!
//! Counts down the images of the first Copy. Loaded and failed images both
//! count; an image already complete when tracking begins counts at once.
//! Reaching zero reports `true` exactly once so the caller runs a single
//! measurement pass.

use marquee_port::ImageStatus;

/// Countdown over the first Copy's images.
#[derive(Clone, Debug, Default)]
pub struct ImageReadiness {
    settled: Vec<bool>,
    remaining: usize,
    begun: bool,
    fired: bool,
}

impl ImageReadiness {
    /// Tracker that has not seen any images yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking. Returns `true` if everything is already settled.
    pub fn begin(&mut self, statuses: &[ImageStatus]) -> bool {
        self.settled = statuses
            .iter()
            .map(|status| *status == ImageStatus::Settled)
            .collect();
        self.remaining = self.settled.iter().filter(|done| !**done).count();
        self.begun = true;
        self.fired = false;
        self.fire_if_done()
    }

    /// Record that image `index` loaded or failed.
    ///
    /// Returns `true` on the transition to ready. Repeats, unknown indices,
    /// and events before [`begin`](Self::begin) are ignored.
    pub fn settle(&mut self, index: usize) -> bool {
        if !self.begun {
            return false;
        }
        match self.settled.get_mut(index) {
            Some(done) if !*done => {
                *done = true;
                self.remaining -= 1;
                self.fire_if_done()
            }
            _ => false,
        }
    }

    fn fire_if_done(&mut self) -> bool {
        if self.remaining == 0 && !self.fired {
            self.fired = true;
            return true;
        }
        false
    }

    /// All images settled.
    pub fn is_ready(&self) -> bool {
        self.begun && self.remaining == 0
    }

    /// Images still outstanding.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Images tracked.
    pub fn total(&self) -> usize {
        self.settled.len()
    }
}
