// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host port trait defining the surface contract.

use alloc::vec::Vec;
use core::time::Duration;

use crate::{
    Extent, FrameHandle, ImageStatus, MeasureTarget, NativeLoop, Orientation, PortError,
    TimerHandle, TrackLayout,
};

/// Host surface port.
///
/// Implementors measure, schedule, and write. They never decide anything.
///
/// # Design
///
/// This trait defines a hexagonal port for the Track. The engine issues
/// requests; adapters (DOM via web-sys, headless mocks) implement this trait.
/// Asynchronous results come back as [`crate::HostEvent`]s.
///
/// # Exclusivity
///
/// The engine guarantees that at most one of `write_transform` (JS loop) and
/// `install_native_loop` (declarative loop) is in effect at a time, and calls
/// `remove_native_loop` before switching back to transform writes.
pub trait HostPort {
    /// Measure an element. Returns a zero extent when not laid out.
    fn measure(&self, target: MeasureTarget) -> Extent;

    /// Load state of every image in the first Copy, in document order.
    fn image_statuses(&self) -> Vec<ImageStatus>;

    /// Whether the reduced-motion accessibility preference is active.
    fn prefers_reduced_motion(&self) -> bool;

    /// Whether the document is currently hidden.
    fn document_hidden(&self) -> bool {
        false
    }

    /// Schedule one animation-frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled frame. Unknown or fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Start a one-shot timer.
    fn set_timeout(&mut self, delay: Duration) -> TimerHandle;

    /// Clear a timer. Unknown or fired handles are ignored.
    fn clear_timeout(&mut self, handle: TimerHandle);

    /// Observe the container and first Copy with the native size observer.
    ///
    /// Returns [`PortError::Unsupported`] when the platform has none.
    fn observe_size(&mut self) -> Result<(), PortError>;

    /// Listen for window resizes (fallback when `observe_size` is unsupported).
    fn listen_window_resize(&mut self);

    /// Detach every observer and listener installed by the two methods above.
    fn disconnect_observers(&mut self);

    /// Build or rebuild the region, Track, and Copies.
    fn render_track(&mut self, layout: &TrackLayout);

    /// Translate the Track by `-offset` pixels along `orientation`.
    fn write_transform(&mut self, orientation: Orientation, offset: f64);

    /// Install (or replace) the declarative loop on the Track.
    fn install_native_loop(&mut self, native: &NativeLoop);

    /// Pause or resume the declarative loop.
    fn set_native_loop_paused(&mut self, paused: bool);

    /// Remove the declarative loop.
    fn remove_native_loop(&mut self);
}
