// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless [`HostPort`] that records every request.
//!
//! Measurements, image states, and platform capabilities are scripted. Frames
//! and timers are queued until a test fires them (see [`crate::pump`]).

use std::time::Duration;

use marquee_port::{
    Extent, FrameHandle, HostPort, ImageStatus, ItemContent, MeasureTarget, NativeLoop,
    Orientation, PortError, TimerHandle, TrackLayout,
};

/// Observation state installed by the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MockObserver {
    /// Nothing attached.
    #[default]
    None,
    /// Native size observer.
    Size,
    /// Window resize listener.
    WindowResize,
}

/// Mock host for testing.
///
/// Implements `HostPort` by recording calls in plain fields.
#[derive(Debug)]
pub struct MockHost {
    next_id: u64,
    /// Frames requested and not yet fired or cancelled, in request order.
    pub pending_frames: Vec<FrameHandle>,
    /// Number of `request_frame` calls.
    pub frame_requests: usize,
    /// Frames the engine cancelled.
    pub cancelled_frames: Vec<FrameHandle>,
    /// Timers started and not yet fired or cleared.
    pub pending_timers: Vec<(TimerHandle, Duration)>,
    /// Timers the engine cleared.
    pub cleared_timers: Vec<TimerHandle>,
    /// Every transform write.
    pub transforms: Vec<(Orientation, f64)>,
    /// Installed declarative loop.
    pub native_loop: Option<NativeLoop>,
    /// Number of `install_native_loop` calls.
    pub native_installs: usize,
    /// Declarative loop play state.
    pub native_paused: bool,
    /// Every rendered layout.
    pub renders: Vec<TrackLayout>,
    /// Current observer.
    pub observer: MockObserver,
    /// Number of `disconnect_observers` calls.
    pub disconnects: usize,
    /// Scripted first-Copy extent.
    pub first_copy: Extent,
    /// Scripted container extent.
    pub container: Extent,
    /// Scripted viewport extent.
    pub viewport: Extent,
    /// Scripted image states. `None` reports every first-Copy image settled.
    pub images: Option<Vec<ImageStatus>>,
    /// Scripted reduced-motion preference.
    pub reduced_motion: bool,
    /// Scripted document visibility.
    pub hidden: bool,
    /// Whether `observe_size` succeeds.
    pub size_observer_supported: bool,
}

impl Default for MockHost {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending_frames: Vec::new(),
            frame_requests: 0,
            cancelled_frames: Vec::new(),
            pending_timers: Vec::new(),
            cleared_timers: Vec::new(),
            transforms: Vec::new(),
            native_loop: None,
            native_installs: 0,
            native_paused: false,
            renders: Vec::new(),
            observer: MockObserver::None,
            disconnects: 0,
            first_copy: Extent::default(),
            container: Extent::new(1280.0, 40.0),
            viewport: Extent::new(1280.0, 800.0),
            images: None,
            reduced_motion: false,
            hidden: false,
            size_observer_supported: true,
        }
    }
}

impl MockHost {
    /// Desktop-sized host with an unmeasurable first Copy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport width (height stays).
    pub fn with_viewport_width(mut self, width: f64) -> Self {
        self.viewport.width = width;
        self
    }

    /// Set the container width (height stays).
    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container.width = width;
        self
    }

    /// Set the first Copy's width.
    pub fn with_sequence_width(mut self, width: f64) -> Self {
        self.first_copy = Extent::new(width, 28.0);
        self
    }

    /// Script image states.
    pub fn with_images(mut self, images: Vec<ImageStatus>) -> Self {
        self.images = Some(images);
        self
    }

    /// Start with the reduced-motion preference on.
    pub fn with_reduced_motion(mut self) -> Self {
        self.reduced_motion = true;
        self
    }

    /// Make `observe_size` report `Unsupported`.
    pub fn without_size_observer(mut self) -> Self {
        self.size_observer_supported = false;
        self
    }

    /// Drain the pending frames (the caller is expected to fire them).
    pub fn take_frames(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending_frames)
    }

    /// Drain the pending timers.
    pub fn take_timers(&mut self) -> Vec<TimerHandle> {
        self.pending_timers
            .drain(..)
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Most recent transform offset, if any.
    pub fn last_offset(&self) -> Option<f64> {
        self.transforms.last().map(|(_, offset)| *offset)
    }

    /// Most recent layout, if any.
    pub fn last_render(&self) -> Option<&TrackLayout> {
        self.renders.last()
    }

    fn next_handle(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl HostPort for MockHost {
    fn measure(&self, target: MeasureTarget) -> Extent {
        match target {
            MeasureTarget::FirstCopy => self.first_copy,
            MeasureTarget::Container => self.container,
            MeasureTarget::Viewport => self.viewport,
        }
    }

    fn image_statuses(&self) -> Vec<ImageStatus> {
        if let Some(images) = &self.images {
            return images.clone();
        }
        self.renders
            .last()
            .and_then(|layout| layout.copies.first())
            .map(|copy| {
                copy.items
                    .iter()
                    .filter(|item| matches!(item.content, ItemContent::Image(_)))
                    .map(|_| ImageStatus::Settled)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn document_hidden(&self) -> bool {
        self.hidden
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_handle());
        self.pending_frames.push(handle);
        self.frame_requests += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_frames.retain(|pending| *pending != handle);
        self.cancelled_frames.push(handle);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_handle());
        self.pending_timers.push((handle, delay));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        self.pending_timers.retain(|(pending, _)| *pending != handle);
        self.cleared_timers.push(handle);
    }

    fn observe_size(&mut self) -> Result<(), PortError> {
        if !self.size_observer_supported {
            return Err(PortError::Unsupported("ResizeObserver".into()));
        }
        self.observer = MockObserver::Size;
        Ok(())
    }

    fn listen_window_resize(&mut self) {
        self.observer = MockObserver::WindowResize;
    }

    fn disconnect_observers(&mut self) {
        self.observer = MockObserver::None;
        self.disconnects += 1;
    }

    fn render_track(&mut self, layout: &TrackLayout) {
        self.renders.push(layout.clone());
    }

    fn write_transform(&mut self, orientation: Orientation, offset: f64) {
        self.transforms.push((orientation, offset));
    }

    fn install_native_loop(&mut self, native: &NativeLoop) {
        self.native_loop = Some(*native);
        self.native_installs += 1;
        self.native_paused = false;
    }

    fn set_native_loop_paused(&mut self, paused: bool) {
        self.native_paused = paused;
    }

    fn remove_native_loop(&mut self) {
        self.native_loop = None;
        self.native_paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_removes_pending_frame() {
        let mut host = MockHost::new();
        let a = host.request_frame();
        let b = host.request_frame();
        host.cancel_frame(a);
        assert_eq!(host.frame_requests, 2);
        assert_eq!(host.pending_frames, vec![b]);
        assert_eq!(host.cancelled_frames, vec![a]);
    }

    #[test]
    fn handles_are_unique_across_frames_and_timers() {
        let mut host = MockHost::new();
        let frame = host.request_frame();
        let timer = host.set_timeout(Duration::from_millis(100));
        assert_ne!(frame.0, timer.0);
    }

    #[test]
    fn unsupported_observer_is_reported() {
        let mut host = MockHost::new().without_size_observer();
        assert!(matches!(
            host.observe_size(),
            Err(PortError::Unsupported(_))
        ));
        assert_eq!(host.observer, MockObserver::None);
    }
}
