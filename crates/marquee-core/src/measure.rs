// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sequence Measurer: loop period and Copy count.
//!
//! The period is one Sequence's length along the axis of travel. It comes
//! from the first Copy's bounding rect whenever that is laid out; otherwise
//! the container, then the viewport, then a per-item estimate stand in so
//! the wrap arithmetic always has a non-zero modulus when there is content.
//! Only a first-Copy reading counts as a *measured* sequence size.
//!
//! Callers run [`measure`] from a deferred (next-frame) callback rather than
//! straight out of a resize or load handler. Reduced motion is the exception:
//! it schedules no frames at all and measures in the handler.

use marquee_port::{HostPort, MeasureTarget, Orientation};
use serde::Serialize;

use crate::tuning::EngineTuning;

/// Where the loop period came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeSource {
    /// Bounding rect of the first Copy.
    FirstCopy,
    /// The container's own size.
    Container,
    /// The viewport size.
    Viewport,
    /// `logo_count × estimated_item_extent`.
    Estimate,
}

/// Result of one measurement pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    /// Measured Sequence size; `0` until the first Copy has a usable box.
    pub sequence_size: f64,
    /// Modulus for offset wrapping; falls back through the policy chain.
    pub period: f64,
    /// Which policy step produced `period`.
    pub source: SizeSource,
    /// Visible extent of the region along the axis.
    pub visible_size: f64,
    /// Copies needed for gap-free coverage.
    pub copy_count: usize,
}

fn usable(size: f64) -> bool {
    size.is_finite() && size > 0.0
}

/// Sequence size assumed for `logo_count` items when nothing can be measured.
pub fn estimated_size(logo_count: usize, tuning: &EngineTuning) -> f64 {
    logo_count as f64 * tuning.estimated_item_extent
}

/// Copies needed so the Track never shows a gap:
/// `max(min_copies, ceil(visible / sequence) + headroom)`.
///
/// An unknown sequence size yields `min_copies`.
pub fn copy_count(visible_size: f64, sequence_size: f64, tuning: &EngineTuning) -> usize {
    if !usable(sequence_size) {
        return tuning.min_copies;
    }
    let visible = if visible_size.is_finite() {
        visible_size.max(0.0)
    } else {
        0.0
    };
    let needed = (visible / sequence_size).ceil() as usize + tuning.copy_headroom;
    needed.max(tuning.min_copies)
}

/// Run the measurement policy against the host.
pub fn measure<H: HostPort>(
    host: &H,
    orientation: Orientation,
    logo_count: usize,
    tuning: &EngineTuning,
) -> Measurement {
    let copy = host.measure(MeasureTarget::FirstCopy).along(orientation);
    let container = host.measure(MeasureTarget::Container).along(orientation);
    let viewport = host.measure(MeasureTarget::Viewport).along(orientation);

    let visible_size = if usable(container) {
        container
    } else if usable(viewport) {
        viewport
    } else {
        0.0
    };

    let (period, source) = if usable(copy) {
        (copy, SizeSource::FirstCopy)
    } else if usable(container) {
        (container, SizeSource::Container)
    } else if usable(viewport) {
        (viewport, SizeSource::Viewport)
    } else {
        (estimated_size(logo_count, tuning), SizeSource::Estimate)
    };

    let sequence_size = if usable(copy) { copy } else { 0.0 };

    Measurement {
        sequence_size,
        period,
        source,
        visible_size,
        copy_count: copy_count(visible_size, sequence_size, tuning),
    }
}
