// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Dimension Watcher: coalesces size changes into one measurement per frame.

use std::time::Duration;

use marquee_port::{FrameHandle, HostPort, PortError, TimerHandle};
use serde::Serialize;
use tracing::{debug, warn};

/// Which observation mechanism is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ObserverKind {
    /// Not attached.
    #[default]
    Detached,
    /// Native size observer on container and first Copy.
    SizeObserver,
    /// Window resize listener fallback.
    WindowResize,
}

/// Pending-flag coalescer plus post-mount retry timers.
///
/// Any number of [`notify`](Self::notify) calls between two frames collapse
/// into a single scheduled frame.
#[derive(Debug, Default)]
pub struct DimensionWatcher {
    pending: Option<FrameHandle>,
    retries: Vec<TimerHandle>,
    observer: ObserverKind,
}

impl DimensionWatcher {
    /// Detached watcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing and schedule the fixed-delay re-measurements.
    pub fn attach<H: HostPort>(&mut self, host: &mut H, retry_delays: &[Duration]) {
        self.observer = match host.observe_size() {
            Ok(()) => ObserverKind::SizeObserver,
            Err(PortError::Unsupported(reason)) => {
                warn!(%reason, "no native size observer, falling back to window resize");
                host.listen_window_resize();
                ObserverKind::WindowResize
            }
            Err(err) => {
                warn!(%err, "size observer failed, falling back to window resize");
                host.listen_window_resize();
                ObserverKind::WindowResize
            }
        };
        self.retries = retry_delays
            .iter()
            .map(|delay| host.set_timeout(*delay))
            .collect();
        debug!(observer = ?self.observer, retries = self.retries.len(), "dimension watcher attached");
    }

    /// Ask for a measurement on the next frame.
    ///
    /// Returns `true` if a frame was scheduled, `false` if one was already pending.
    pub fn notify<H: HostPort>(&mut self, host: &mut H) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(host.request_frame());
        true
    }

    /// Whether `handle` is the pending measurement frame. Clears the flag if so.
    pub fn claim_frame(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Cancel the scheduled measurement frame. Returns whether one was pending.
    pub fn cancel_pending<H: HostPort>(&mut self, host: &mut H) -> bool {
        match self.pending.take() {
            Some(handle) => {
                host.cancel_frame(handle);
                true
            }
            None => false,
        }
    }

    /// Whether `handle` is one of the retry timers. Forgets it if so.
    pub fn claim_timer(&mut self, handle: TimerHandle) -> bool {
        let before = self.retries.len();
        self.retries.retain(|timer| *timer != handle);
        self.retries.len() != before
    }

    /// Cancel the pending frame and timers and detach observers.
    pub fn detach<H: HostPort>(&mut self, host: &mut H) {
        if let Some(handle) = self.pending.take() {
            host.cancel_frame(handle);
        }
        for timer in self.retries.drain(..) {
            host.clear_timeout(timer);
        }
        if self.observer != ObserverKind::Detached {
            host.disconnect_observers();
            self.observer = ObserverKind::Detached;
        }
    }

    /// Active observation mechanism.
    pub fn observer(&self) -> ObserverKind {
        self.observer
    }

    /// A measurement frame is scheduled.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Retry timers still outstanding.
    pub fn retries_outstanding(&self) -> usize {
        self.retries.len()
    }
}
