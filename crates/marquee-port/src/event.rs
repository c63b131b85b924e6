// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Events a host feeds back into the engine.

use crate::{FrameHandle, TimerHandle};

/// Asynchronous happenings reported by the host.
///
/// Hosts translate their native callbacks (animation frames, timers,
/// observers, DOM events) into these values and pass them to the engine's
/// dispatch entry point. Ordering between events is whatever the host
/// observed; the engine coalesces where it matters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// A frame requested via [`crate::HostPort::request_frame`] fired.
    Frame {
        /// Handle returned when the frame was requested.
        handle: FrameHandle,
        /// High-resolution timestamp in milliseconds.
        timestamp_ms: f64,
    },
    /// A timer started via [`crate::HostPort::set_timeout`] elapsed.
    Timer(TimerHandle),
    /// The container, first Copy, or window changed size.
    Resized,
    /// Image `index` of the first Copy finished loading or failed.
    ImageSettled {
        /// Position of the image within the first Copy.
        index: usize,
    },
    /// Pointer entered the Track.
    PointerEnter,
    /// Pointer left the Track.
    PointerLeave,
    /// A touch began on the Track.
    TouchStart,
    /// A touch ended.
    TouchEnd,
    /// A touch was cancelled by the platform.
    TouchCancel,
    /// The viewport width changed (resize or orientation change).
    ViewportChanged {
        /// New layout viewport width in pixels.
        width: f64,
    },
    /// The reduced-motion accessibility preference changed.
    ReducedMotionChanged(bool),
    /// The document became hidden or visible.
    VisibilityChanged {
        /// `true` when the page is no longer visible.
        hidden: bool,
    },
}
