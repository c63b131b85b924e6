// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Host port contract for the marquee track engine.
//!
//! This crate defines the boundary between the engine (`marquee-core`) and
//! whatever surface actually shows the Track: a browser DOM, a native UI
//! toolkit, or a headless test double. It contains NO motion or layout
//! logic. That lives in the engine.
//!
//! # Design Principles
//!
//! - **Hosts are dumb**: they measure, schedule, and write one transform.
//!   No domain logic.
//! - **No time ownership**: frame timestamps come from the host; the engine
//!   never reads a clock.
//! - **Handles are cancellation tokens**: every scheduled callback carries
//!   an opaque handle. A handle the engine has forgotten is a no-op.
//!
//! # Crate Features
//!
//! - `std` (default): Enables std library. Disable for no_std contexts.
//! - `serde`: Derives `Serialize`/`Deserialize` for the domain types.

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

use thiserror::Error;

/// Error type for host capabilities that may be missing or fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    /// The host platform lacks the requested primitive.
    #[error("unsupported: {0}")]
    Unsupported(alloc::string::String),
    /// A backend-specific error occurred.
    #[error("backend error: {0}")]
    Backend(alloc::string::String),
}

mod event;
mod layout;
mod port;
mod types;

pub use event::HostEvent;
pub use layout::{
    CopyLayout, FadeOverlay, ImageLayout, ItemContent, ItemLayout, Loading, TrackLayout,
    TrackStyle,
};
pub use port::HostPort;
pub use types::{
    Direction, Extent, FrameHandle, ImageStatus, LogoItem, MeasureTarget, NativeLoop,
    Orientation, TimerHandle,
};
