// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Numeric constants of the engine, overridable per instance.

use std::time::Duration;

/// Smoothing time constant of the velocity easing, in seconds.
pub const SMOOTH_TAU_SECS: f64 = 0.25;
/// Fewest Copies ever rendered.
pub const MIN_COPIES: usize = 4;
/// Copies rendered beyond what covers the visible extent.
pub const COPY_HEADROOM: usize = 3;
/// Assumed item extent when nothing can be measured, in pixels.
pub const ESTIMATED_ITEM_EXTENT: f64 = 200.0;
/// Viewports at or below this width (px) use the native loop.
pub const MOBILE_BREAKPOINT: f64 = 767.0;
/// Shortest native loop period, in seconds.
pub const MIN_LOOP_SECS: f64 = 10.0;
/// Longest native loop period, in seconds.
pub const MAX_LOOP_SECS: f64 = 120.0;

/// Engine tuning knobs.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineTuning {
    /// Velocity smoothing time constant (seconds).
    pub smoothing_tau_secs: f64,
    /// Lower bound on the Copy count.
    pub min_copies: usize,
    /// Extra Copies beyond coverage.
    pub copy_headroom: usize,
    /// Per-item size estimate used when measurement is unavailable.
    pub estimated_item_extent: f64,
    /// Max viewport width (px) treated as Mobile Mode.
    pub mobile_breakpoint: f64,
    /// Native loop duration floor (seconds).
    pub min_loop_secs: f64,
    /// Native loop duration ceiling (seconds).
    pub max_loop_secs: f64,
    /// Fixed-delay re-measurements scheduled after mount.
    pub remeasure_delays: Vec<Duration>,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            smoothing_tau_secs: SMOOTH_TAU_SECS,
            min_copies: MIN_COPIES,
            copy_headroom: COPY_HEADROOM,
            estimated_item_extent: ESTIMATED_ITEM_EXTENT,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            min_loop_secs: MIN_LOOP_SECS,
            max_loop_secs: MAX_LOOP_SECS,
            remeasure_delays: vec![
                Duration::from_millis(100),
                Duration::from_millis(300),
                Duration::from_millis(1000),
            ],
        }
    }
}
