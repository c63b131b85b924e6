// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mode Selector and the declarative native-loop strategy.

use marquee_port::{HostPort, NativeLoop};
use serde::Serialize;

use crate::measure::estimated_size;
use crate::motion::JsLoop;
use crate::tuning::EngineTuning;

/// Execution mode derived from the viewport breakpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewportMode {
    /// Per-frame JS loop.
    Desktop,
    /// Declarative native loop.
    Mobile,
}

impl ViewportMode {
    /// Mode for a viewport `width`, matching `(max-width: breakpoint)`.
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width.is_finite() && width <= breakpoint {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// Seconds for one native loop period.
///
/// `clamp(sequence_size / |speed|, min, max)`, with `logo_count × estimate`
/// standing in for an unmeasured sequence. `None` when there is nothing to
/// move (zero speed or no items).
pub fn native_loop_duration(
    sequence_size: f64,
    speed: f64,
    logo_count: usize,
    tuning: &EngineTuning,
) -> Option<f64> {
    let magnitude = speed.abs();
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return None;
    }
    let size = if sequence_size.is_finite() && sequence_size > 0.0 {
        sequence_size
    } else {
        estimated_size(logo_count, tuning)
    };
    if size <= 0.0 {
        return None;
    }
    Some((size / magnitude).clamp(tuning.min_loop_secs, tuning.max_loop_secs))
}

/// Discriminant of [`MotionStrategy`], for snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// Per-frame loop.
    JsLoop,
    /// Declarative loop.
    NativeLoop,
    /// Nothing moves.
    Static,
}

/// The single writer of the Track's transform.
#[derive(Debug, Default)]
pub enum MotionStrategy {
    /// Desktop: JS-driven frames.
    JsLoop(JsLoop),
    /// Mobile: host-driven declarative loop.
    NativeLoop {
        /// Installed loop description.
        native: NativeLoop,
        /// Paused by hover.
        paused: bool,
    },
    /// Reduced motion, or a native loop with nothing to move.
    #[default]
    Static,
}

impl MotionStrategy {
    /// Discriminant.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::JsLoop(_) => StrategyKind::JsLoop,
            Self::NativeLoop { .. } => StrategyKind::NativeLoop,
            Self::Static => StrategyKind::Static,
        }
    }

    /// Release whatever this strategy holds on the host.
    pub fn stop<H: HostPort>(self, host: &mut H) {
        match self {
            Self::JsLoop(js) => js.stop(host),
            Self::NativeLoop { .. } => host.remove_native_loop(),
            Self::Static => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_is_inclusive() {
        assert_eq!(ViewportMode::from_width(767.0, 767.0), ViewportMode::Mobile);
        assert_eq!(ViewportMode::from_width(768.0, 767.0), ViewportMode::Desktop);
        assert_eq!(ViewportMode::from_width(f64::NAN, 767.0), ViewportMode::Desktop);
    }

    #[test]
    fn duration_is_size_over_speed() {
        let tuning = EngineTuning::default();
        assert_eq!(native_loop_duration(2400.0, 120.0, 5, &tuning), Some(20.0));
        assert_eq!(native_loop_duration(2400.0, -120.0, 5, &tuning), Some(20.0));
    }

    #[test]
    fn duration_clamps() {
        let tuning = EngineTuning::default();
        assert_eq!(native_loop_duration(10.0, 120.0, 5, &tuning), Some(10.0));
        assert_eq!(native_loop_duration(100_000.0, 120.0, 5, &tuning), Some(120.0));
    }

    #[test]
    fn duration_estimates_unmeasured_sequence() {
        let tuning = EngineTuning::default();
        // 12 × 200 / 100 = 24
        assert_eq!(native_loop_duration(0.0, 100.0, 12, &tuning), Some(24.0));
    }

    #[test]
    fn nothing_to_move() {
        let tuning = EngineTuning::default();
        assert_eq!(native_loop_duration(2400.0, 0.0, 5, &tuning), None);
        assert_eq!(native_loop_duration(0.0, 120.0, 0, &tuning), None);
    }
}
