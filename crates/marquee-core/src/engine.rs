// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The marquee controller: one Track, one MotionState, one active writer.

use marquee_port::{HostEvent, HostPort, LogoItem, MeasureTarget, NativeLoop};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::interaction::{target_velocity, InteractionHandler};
use crate::layout::{build_layout, ItemRenderer};
use crate::measure::{measure, SizeSource};
use crate::mode::{native_loop_duration, MotionStrategy, StrategyKind, ViewportMode};
use crate::motion::{wrap_offset, JsLoop};
use crate::options::{HoverBehavior, MarqueeOptions};
use crate::readiness::ImageReadiness;
use crate::tuning::EngineTuning;
use crate::watcher::{DimensionWatcher, ObserverKind};

/// Lifecycle of the Track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Lifecycle {
    /// Constructed, not yet mounted.
    Idle,
    /// Rendered and animating (or pinned).
    Mounted,
    /// Torn down; every event is ignored.
    Unmounted,
}

/// Serialisable view of the engine for diagnostics and bindings.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarqueeSnapshot {
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
    /// Viewport mode.
    pub mode: ViewportMode,
    /// Active strategy.
    pub strategy: StrategyKind,
    /// Size observation mechanism.
    pub observer: ObserverKind,
    /// Wrapped offset (px); `0` unless the JS loop runs.
    pub offset: f64,
    /// Current velocity (px/s).
    pub current_velocity: f64,
    /// Target velocity (px/s).
    pub target_velocity: f64,
    /// Measured Sequence size (px), `0` until measured.
    pub sequence_size: f64,
    /// Loop period actually used for wrapping (px).
    pub period: f64,
    /// Source of `period`.
    pub period_source: Option<SizeSource>,
    /// Rendered Copies.
    pub copy_count: usize,
    /// Hover state.
    pub hovered: bool,
    /// First-Copy images all settled.
    pub images_ready: bool,
    /// Reduced-motion preference.
    pub reduced_motion: bool,
}

/// Engine driving one marquee Track through a [`HostPort`].
///
/// The host calls [`mount`](Self::mount), forwards its callbacks through
/// [`dispatch`](Self::dispatch), and calls [`unmount`](Self::unmount) on
/// teardown. Nothing here returns an error: degraded inputs degrade motion,
/// never the host page.
pub struct Marquee<H> {
    host: H,
    options: MarqueeOptions,
    tuning: EngineTuning,
    renderer: Option<Box<dyn ItemRenderer>>,
    lifecycle: Lifecycle,
    mode: ViewportMode,
    reduced_motion: bool,
    hidden: bool,
    sequence_size: f64,
    period: f64,
    period_source: Option<SizeSource>,
    copy_count: usize,
    watcher: DimensionWatcher,
    readiness: ImageReadiness,
    interaction: InteractionHandler,
    strategy: MotionStrategy,
}

impl<H: HostPort> Marquee<H> {
    /// Engine for `host` with `options` (unusable numbers are sanitised).
    pub fn new(host: H, options: MarqueeOptions) -> Self {
        let tuning = EngineTuning::default();
        let options = options.sanitized();
        let period = crate::measure::estimated_size(options.logos.len(), &tuning);
        Self {
            host,
            options,
            copy_count: tuning.min_copies,
            tuning,
            renderer: None,
            lifecycle: Lifecycle::Idle,
            mode: ViewportMode::Desktop,
            reduced_motion: false,
            hidden: false,
            sequence_size: 0.0,
            period,
            period_source: None,
            watcher: DimensionWatcher::new(),
            readiness: ImageReadiness::new(),
            interaction: InteractionHandler::new(),
            strategy: MotionStrategy::Static,
        }
    }

    /// Replace the tuning constants. Takes effect at the next mount.
    pub fn with_tuning(mut self, tuning: EngineTuning) -> Self {
        self.copy_count = tuning.min_copies;
        self.period = crate::measure::estimated_size(self.options.logos.len(), &tuning);
        self.tuning = tuning;
        self
    }

    /// Render items through `renderer` instead of the default image element.
    pub fn with_renderer(mut self, renderer: impl ItemRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Render the Track, start observing, and start the motion strategy.
    pub fn mount(&mut self) {
        if self.lifecycle == Lifecycle::Mounted {
            return;
        }
        self.lifecycle = Lifecycle::Mounted;
        self.reduced_motion = self.host.prefers_reduced_motion();
        self.hidden = self.host.document_hidden();
        self.mode = ViewportMode::from_width(
            self.host.measure(MeasureTarget::Viewport).width,
            self.tuning.mobile_breakpoint,
        );

        self.render();
        self.watcher
            .attach(&mut self.host, &self.tuning.remeasure_delays);
        let statuses = self.host.image_statuses();
        self.readiness.begin(&statuses);
        self.request_measure();

        self.host.write_transform(self.options.orientation(), 0.0);
        self.start_strategy();
        debug!(
            logos = self.options.logos.len(),
            images = statuses.len(),
            mode = ?self.mode,
            strategy = ?self.strategy.kind(),
            reduced_motion = self.reduced_motion,
            "marquee mounted"
        );
    }

    /// Cancel every frame, timer, observer, and loop. Idempotent.
    pub fn unmount(&mut self) {
        if self.lifecycle != Lifecycle::Mounted {
            return;
        }
        std::mem::take(&mut self.strategy).stop(&mut self.host);
        self.watcher.detach(&mut self.host);
        self.interaction.cancel(&mut self.host);
        self.lifecycle = Lifecycle::Unmounted;
        debug!("marquee unmounted");
    }

    /// Swap the item list. The Track is torn down and built again with a
    /// fresh MotionState.
    pub fn replace_logos(&mut self, logos: Vec<LogoItem>) {
        let was_mounted = self.lifecycle == Lifecycle::Mounted;
        self.unmount();
        self.options.logos = logos;
        self.sequence_size = 0.0;
        self.period = crate::measure::estimated_size(self.options.logos.len(), &self.tuning);
        self.period_source = None;
        self.copy_count = self.tuning.min_copies;
        self.readiness = ImageReadiness::new();
        self.interaction = InteractionHandler::new();
        self.watcher = DimensionWatcher::new();
        self.lifecycle = Lifecycle::Idle;
        if was_mounted {
            self.mount();
        }
    }

    /// Feed one host event into the engine.
    pub fn dispatch(&mut self, event: HostEvent) {
        if self.lifecycle != Lifecycle::Mounted {
            trace!(?event, lifecycle = ?self.lifecycle, "event ignored");
            return;
        }
        match event {
            HostEvent::Frame {
                handle,
                timestamp_ms,
            } => {
                if self.watcher.claim_frame(handle) {
                    self.measure_pass();
                } else if let Some(changed) = self.interaction.claim_frame(handle) {
                    if changed {
                        self.hover_changed();
                    }
                } else if !self.tick(handle, timestamp_ms) {
                    trace!(?handle, "stale frame ignored");
                }
            }
            HostEvent::Timer(handle) => {
                if self.watcher.claim_timer(handle) {
                    self.request_measure();
                }
            }
            HostEvent::Resized => self.request_measure(),
            HostEvent::ImageSettled { index } => {
                if self.readiness.settle(index) {
                    debug!(images = self.readiness.total(), "images settled");
                    self.request_measure();
                }
            }
            HostEvent::PointerEnter => self.pointer(true),
            HostEvent::PointerLeave => self.pointer(false),
            HostEvent::TouchStart => self.touch(true),
            HostEvent::TouchEnd | HostEvent::TouchCancel => self.touch(false),
            HostEvent::ViewportChanged { width } => {
                let mode = ViewportMode::from_width(width, self.tuning.mobile_breakpoint);
                if mode != self.mode {
                    debug!(from = ?self.mode, to = ?mode, width, "viewport mode changed");
                    self.mode = mode;
                    self.restart_strategy();
                }
                self.request_measure();
            }
            HostEvent::ReducedMotionChanged(reduced) => {
                if reduced != self.reduced_motion {
                    debug!(reduced, "reduced-motion preference changed");
                    self.reduced_motion = reduced;
                    self.restart_strategy();
                    if reduced {
                        self.flush_frames();
                    }
                }
            }
            HostEvent::VisibilityChanged { hidden } => {
                self.hidden = hidden;
                if let MotionStrategy::JsLoop(js) = &mut self.strategy {
                    if hidden {
                        js.suspend(&mut self.host);
                    } else {
                        js.resume(&mut self.host);
                    }
                }
            }
        }
    }

    fn render(&mut self) {
        let layout = build_layout(&self.options, self.copy_count, self.renderer.as_deref());
        self.host.render_track(&layout);
    }

    /// Reduced motion never schedules a frame, so it measures on the spot.
    fn request_measure(&mut self) {
        if self.reduced_motion {
            self.measure_pass();
        } else {
            self.watcher.notify(&mut self.host);
        }
    }

    /// Settle frame-deferred work at once after reduced motion turns on.
    fn flush_frames(&mut self) {
        if self.watcher.cancel_pending(&mut self.host) {
            self.measure_pass();
        }
        if self.interaction.flush(&mut self.host) == Some(true) {
            self.hover_changed();
        }
    }

    fn measure_pass(&mut self) {
        if !self.readiness.is_ready() {
            trace!(
                remaining = self.readiness.remaining(),
                "measurement deferred until images settle"
            );
            return;
        }
        let m = measure(
            &self.host,
            self.options.orientation(),
            self.options.logos.len(),
            &self.tuning,
        );
        if m.source == SizeSource::Estimate && self.period_source != Some(SizeSource::Estimate) {
            warn!(
                estimate = m.period,
                logos = self.options.logos.len(),
                "nothing measurable, using estimated sequence size"
            );
        }

        let period_changed = (m.period - self.period).abs() > f64::EPSILON;
        self.sequence_size = m.sequence_size;
        self.period = m.period;
        self.period_source = Some(m.source);

        if m.copy_count != self.copy_count {
            debug!(from = self.copy_count, to = m.copy_count, "copy count changed");
            self.copy_count = m.copy_count;
            self.render();
        }

        if period_changed {
            debug!(
                sequence_size = m.sequence_size,
                period = m.period,
                source = ?m.source,
                "sequence measured"
            );
        }
        let wanted = self.native_loop();
        let stale_native = matches!(
            &self.strategy,
            MotionStrategy::NativeLoop { native, .. } if Some(*native) != wanted
        );
        if stale_native {
            self.restart_strategy();
        } else if let MotionStrategy::JsLoop(js) = &mut self.strategy {
            if period_changed {
                js.rewrap(self.period);
            }
        }
    }

    fn tick(&mut self, handle: marquee_port::FrameHandle, timestamp_ms: f64) -> bool {
        let target = target_velocity(
            self.options.base_velocity(),
            self.options.hover_behavior(),
            self.interaction.is_hovered(),
        );
        let orientation = self.options.orientation();
        let MotionStrategy::JsLoop(js) = &mut self.strategy else {
            return false;
        };
        if !js.tick(
            &mut self.host,
            handle,
            timestamp_ms,
            target,
            self.period,
            orientation,
            self.tuning.smoothing_tau_secs,
        ) {
            return false;
        }
        if self.options.diagnostics.verbose {
            let state = js.state();
            trace!(
                offset = state.offset,
                velocity = state.current_velocity,
                target,
                "tick"
            );
        }
        true
    }

    fn touch(&mut self, hovered: bool) {
        if self.reduced_motion {
            self.pointer(hovered);
        } else {
            self.interaction.touch(&mut self.host, hovered);
        }
    }

    fn pointer(&mut self, hovered: bool) {
        if self.interaction.pointer(hovered) {
            self.hover_changed();
        }
    }

    fn hover_changed(&mut self) {
        let hovered = self.interaction.is_hovered();
        trace!(hovered, "hover changed");
        let pause = self.options.hover_behavior() == HoverBehavior::Override(0.0);
        if let MotionStrategy::NativeLoop { paused, .. } = &mut self.strategy {
            let want = pause && hovered;
            if *paused != want {
                *paused = want;
                self.host.set_native_loop_paused(want);
            }
        }
    }

    fn restart_strategy(&mut self) {
        std::mem::take(&mut self.strategy).stop(&mut self.host);
        self.host.write_transform(self.options.orientation(), 0.0);
        self.start_strategy();
        debug!(strategy = ?self.strategy.kind(), mode = ?self.mode, "motion strategy started");
    }

    fn start_strategy(&mut self) {
        self.strategy = if self.reduced_motion {
            MotionStrategy::Static
        } else {
            match self.mode {
                ViewportMode::Desktop if self.hidden => MotionStrategy::JsLoop(JsLoop::suspended()),
                ViewportMode::Desktop => MotionStrategy::JsLoop(JsLoop::start(&mut self.host)),
                ViewportMode::Mobile => self.start_native_loop(),
            }
        };
    }

    /// Declarative loop over the current period, shared with the JS wrap.
    fn native_loop(&self) -> Option<NativeLoop> {
        let duration_secs = native_loop_duration(
            self.period,
            self.options.speed,
            self.options.logos.len(),
            &self.tuning,
        )?;
        let distance = if self.period > 0.0 {
            self.period
        } else {
            crate::measure::estimated_size(self.options.logos.len(), &self.tuning)
        };
        Some(NativeLoop {
            orientation: self.options.orientation(),
            distance,
            duration_secs,
            reverse: self.options.travel_sign() < 0.0,
        })
    }

    fn start_native_loop(&mut self) -> MotionStrategy {
        let Some(native) = self.native_loop() else {
            return MotionStrategy::Static;
        };
        self.host.install_native_loop(&native);
        let paused = self.interaction.is_hovered()
            && self.options.hover_behavior() == HoverBehavior::Override(0.0);
        if paused {
            self.host.set_native_loop_paused(true);
        }
        MotionStrategy::NativeLoop { native, paused }
    }

    /// Serialisable state for diagnostics.
    pub fn snapshot(&self) -> MarqueeSnapshot {
        let motion = match &self.strategy {
            MotionStrategy::JsLoop(js) => *js.state(),
            _ => crate::motion::MotionState::default(),
        };
        MarqueeSnapshot {
            lifecycle: self.lifecycle,
            mode: self.mode,
            strategy: self.strategy.kind(),
            observer: self.watcher.observer(),
            offset: motion.offset,
            current_velocity: motion.current_velocity,
            target_velocity: motion.target_velocity,
            sequence_size: self.sequence_size,
            period: self.period,
            period_source: self.period_source,
            copy_count: self.copy_count,
            hovered: self.interaction.is_hovered(),
            images_ready: self.readiness.is_ready(),
            reduced_motion: self.reduced_motion,
        }
    }

    /// Wrapped offset of the JS loop (`0` otherwise).
    pub fn offset(&self) -> f64 {
        match &self.strategy {
            MotionStrategy::JsLoop(js) => wrap_offset(js.state().offset, self.period),
            _ => 0.0,
        }
    }

    /// Measured Sequence size, `0` until the first Copy has been measured.
    pub fn sequence_size(&self) -> f64 {
        self.sequence_size
    }

    /// Rendered Copies.
    pub fn copy_count(&self) -> usize {
        self.copy_count
    }

    /// Current viewport mode.
    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Active strategy.
    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Effective options.
    pub fn options(&self) -> &MarqueeOptions {
        &self.options
    }

    /// Tuning constants in effect.
    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    /// The host adapter.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host adapter, mutably (for adapters that keep bookkeeping).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

