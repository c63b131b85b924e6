// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Interaction Handler: pointer and touch to a single `hovered` flag.
//!
//! Pointer enter/leave apply immediately. Touch start/end/cancel are deferred
//! to the next frame so the host's touch listeners return at once and never
//! hold up scrolling; several touches before that frame collapse into the
//! last one.

use marquee_port::{FrameHandle, HostPort};

use crate::options::HoverBehavior;

/// Velocity the loop eases towards given the hover state.
pub fn target_velocity(base: f64, hover: HoverBehavior, hovered: bool) -> f64 {
    match hover {
        HoverBehavior::Override(speed) if hovered => speed,
        _ => base,
    }
}

/// Hover state plus at most one deferred touch update.
#[derive(Debug, Default)]
pub struct InteractionHandler {
    hovered: bool,
    pending_touch: Option<(FrameHandle, bool)>,
}

impl InteractionHandler {
    /// Not hovered, nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pointer enter (`true`) or leave (`false`). Returns whether it changed.
    pub fn pointer(&mut self, hovered: bool) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }

    /// Defer a touch start (`true`) or end/cancel (`false`) to the next frame.
    pub fn touch<H: HostPort>(&mut self, host: &mut H, hovered: bool) {
        match self.pending_touch.as_mut() {
            Some((_, value)) => *value = hovered,
            None => self.pending_touch = Some((host.request_frame(), hovered)),
        }
    }

    /// If `handle` is the deferred touch frame, apply it.
    ///
    /// Returns `None` for foreign handles, otherwise whether the state changed.
    pub fn claim_frame(&mut self, handle: FrameHandle) -> Option<bool> {
        match self.pending_touch {
            Some((pending, value)) if pending == handle => {
                self.pending_touch = None;
                Some(self.pointer(value))
            }
            _ => None,
        }
    }

    /// Apply a deferred touch update now and cancel its frame.
    ///
    /// Returns `None` if nothing was pending, otherwise whether the state changed.
    pub fn flush<H: HostPort>(&mut self, host: &mut H) -> Option<bool> {
        let (handle, value) = self.pending_touch.take()?;
        host.cancel_frame(handle);
        Some(self.pointer(value))
    }

    /// Cancel a deferred touch update.
    pub fn cancel<H: HostPort>(&mut self, host: &mut H) {
        if let Some((handle, _)) = self.pending_touch.take() {
            host.cancel_frame(handle);
        }
    }

    /// Current hover state.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unaffected_ignores_hover() {
        assert_eq!(target_velocity(120.0, HoverBehavior::Unaffected, true), 120.0);
    }

    #[test]
    fn override_applies_only_while_hovered() {
        let hover = HoverBehavior::Override(0.0);
        assert_eq!(target_velocity(120.0, hover, true), 0.0);
        assert_eq!(target_velocity(120.0, hover, false), 120.0);
    }

    #[test]
    fn pointer_reports_changes() {
        let mut handler = InteractionHandler::new();
        assert!(handler.pointer(true));
        assert!(!handler.pointer(true));
        assert!(handler.pointer(false));
        assert!(!handler.is_hovered());
    }
}
