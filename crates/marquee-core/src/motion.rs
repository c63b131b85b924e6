// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Velocity smoothing and the per-frame JS loop.
//!
//! Each frame the current velocity eases towards the target with a
//! first-order exponential filter (`alpha = 1 - exp(-dt / tau)`), then the
//! offset advances by `velocity * dt` and is wrapped into `[0, period)`.
//! The Track is translated by `-offset` along the axis of travel.

use marquee_port::{FrameHandle, HostPort, Orientation};

/// Fraction of the remaining velocity gap closed after `dt_secs`.
pub fn smoothing_alpha(dt_secs: f64, tau_secs: f64) -> f64 {
    if tau_secs <= 0.0 {
        return 1.0;
    }
    1.0 - (-dt_secs / tau_secs).exp()
}

/// Wrap `raw` into `[0, size)`. A non-positive or non-finite `size` yields `0`.
pub fn wrap_offset(raw: f64, size: f64) -> f64 {
    if !(size.is_finite() && size > 0.0) || !raw.is_finite() {
        return 0.0;
    }
    let wrapped = ((raw % size) + size) % size;
    // (tiny negative % size) + size can round up to exactly size.
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

/// Mutable simulation state of one Track.
///
/// Lives outside any UI state; only snapshots are exposed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Velocity currently applied (px/s).
    pub current_velocity: f64,
    /// Velocity being eased towards (px/s).
    pub target_velocity: f64,
    /// Wrapped displacement (px).
    pub offset: f64,
    /// Timestamp of the previous frame (ms), `None` before the first.
    pub last_timestamp: Option<f64>,
}

impl MotionState {
    /// Advance to `timestamp_ms` and return the new offset.
    ///
    /// The first call after construction or [`rewind_clock`](Self::rewind_clock)
    /// only records the timestamp (`dt = 0`).
    pub fn advance(&mut self, timestamp_ms: f64, target: f64, period: f64, tau_secs: f64) -> f64 {
        let dt = match self.last_timestamp {
            Some(last) if timestamp_ms.is_finite() => (timestamp_ms - last).max(0.0) / 1000.0,
            _ => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.last_timestamp = Some(timestamp_ms);
        }
        self.step(dt, target, period, tau_secs)
    }

    /// Advance by an explicit `dt_secs`.
    pub fn step(&mut self, dt_secs: f64, target: f64, period: f64, tau_secs: f64) -> f64 {
        self.target_velocity = target;
        let alpha = smoothing_alpha(dt_secs, tau_secs);
        self.current_velocity += (target - self.current_velocity) * alpha;
        self.offset = wrap_offset(self.offset + self.current_velocity * dt_secs, period);
        self.offset
    }

    /// Forget the previous timestamp so the next frame advances by zero.
    pub fn rewind_clock(&mut self) {
        self.last_timestamp = None;
    }
}

/// Per-frame loop: one outstanding frame at a time, cancelled as a unit.
///
/// The outstanding [`FrameHandle`] is the cancellation token. Once
/// [`stop`](Self::stop) or [`suspend`](Self::suspend) forgets it, a late
/// callback carrying it is not claimed and mutates nothing.
#[derive(Debug, Default)]
pub struct JsLoop {
    state: MotionState,
    frame: Option<FrameHandle>,
}

impl JsLoop {
    /// Create the loop and schedule its first frame.
    pub fn start<H: HostPort>(host: &mut H) -> Self {
        Self {
            state: MotionState::default(),
            frame: Some(host.request_frame()),
        }
    }

    /// Create the loop without scheduling (document hidden).
    pub fn suspended() -> Self {
        Self::default()
    }

    /// Whether `handle` is this loop's outstanding frame.
    pub fn owns(&self, handle: FrameHandle) -> bool {
        self.frame == Some(handle)
    }

    /// Run one frame: ease, advance, write the transform, schedule the next.
    ///
    /// Returns `false` and does nothing if `handle` is not the outstanding frame.
    #[allow(clippy::too_many_arguments)]
    pub fn tick<H: HostPort>(
        &mut self,
        host: &mut H,
        handle: FrameHandle,
        timestamp_ms: f64,
        target: f64,
        period: f64,
        orientation: Orientation,
        tau_secs: f64,
    ) -> bool {
        if !self.owns(handle) {
            return false;
        }
        let offset = self.state.advance(timestamp_ms, target, period, tau_secs);
        host.write_transform(orientation, offset);
        self.frame = Some(host.request_frame());
        true
    }

    /// Cancel the outstanding frame but keep the state.
    pub fn suspend<H: HostPort>(&mut self, host: &mut H) {
        if let Some(handle) = self.frame.take() {
            host.cancel_frame(handle);
        }
        self.state.rewind_clock();
    }

    /// Reschedule after [`suspend`](Self::suspend).
    pub fn resume<H: HostPort>(&mut self, host: &mut H) {
        if self.frame.is_none() {
            self.state.rewind_clock();
            self.frame = Some(host.request_frame());
        }
    }

    /// Cancel for good.
    pub fn stop<H: HostPort>(mut self, host: &mut H) {
        if let Some(handle) = self.frame.take() {
            host.cancel_frame(handle);
        }
    }

    /// Re-wrap the offset after the period changed.
    pub fn rewrap(&mut self, period: f64) {
        self.state.offset = wrap_offset(self.state.offset, period);
    }

    /// Current simulation state.
    pub fn state(&self) -> &MotionState {
        &self.state
    }

    /// A frame is outstanding.
    pub fn is_scheduled(&self) -> bool {
        self.frame.is_some()
    }
}
