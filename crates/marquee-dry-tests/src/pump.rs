// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Drives a [`Marquee`] over a [`MockHost`] the way a browser would.
//!
//! Frames requested while a batch is firing wait for the next batch, which
//! mirrors `requestAnimationFrame`.

use marquee_core::{HostEvent, Marquee};

use crate::host::MockHost;

/// Frame interval of a 60 Hz display, in milliseconds.
pub const FRAME_60HZ_MS: f64 = 1000.0 / 60.0;

/// Fire every pending frame at `timestamp_ms`. Returns how many fired.
pub fn fire_frames(marquee: &mut Marquee<MockHost>, timestamp_ms: f64) -> usize {
    let frames = marquee.host_mut().take_frames();
    let fired = frames.len();
    for handle in frames {
        marquee.dispatch(HostEvent::Frame {
            handle,
            timestamp_ms,
        });
    }
    fired
}

/// Fire every pending timer. Returns how many fired.
pub fn fire_timers(marquee: &mut Marquee<MockHost>) -> usize {
    let timers = marquee.host_mut().take_timers();
    let fired = timers.len();
    for handle in timers {
        marquee.dispatch(HostEvent::Timer(handle));
    }
    fired
}

/// Simulated display clock.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    /// Timestamp of the next frame (ms).
    pub now_ms: f64,
    /// Interval between frames (ms).
    pub interval_ms: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            interval_ms: FRAME_60HZ_MS,
        }
    }
}

impl FrameClock {
    /// Clock starting at `start_ms` ticking every `interval_ms`.
    pub fn new(start_ms: f64, interval_ms: f64) -> Self {
        Self {
            now_ms: start_ms,
            interval_ms,
        }
    }

    /// Fire one batch of frames and advance the clock.
    pub fn step(&mut self, marquee: &mut Marquee<MockHost>) -> usize {
        let fired = fire_frames(marquee, self.now_ms);
        self.now_ms += self.interval_ms;
        fired
    }

    /// Fire `count` batches.
    pub fn run_frames(&mut self, marquee: &mut Marquee<MockHost>, count: usize) {
        for _ in 0..count {
            self.step(marquee);
        }
    }

    /// Fire batches covering `secs` seconds of display time.
    pub fn run_for(&mut self, marquee: &mut Marquee<MockHost>, secs: f64) {
        let frames = (secs * 1000.0 / self.interval_ms).round() as usize;
        self.run_frames(marquee, frames);
    }
}

/// Mount and let the initial measurement settle (timers plus two frame batches).
pub fn mount_settled(marquee: &mut Marquee<MockHost>, clock: &mut FrameClock) {
    marquee.mount();
    clock.step(marquee);
    fire_timers(marquee);
    clock.step(marquee);
}
