// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Seamless infinite logo-loop engine.
//!
//! A Track holds N identical Copies of the item Sequence laid end to end. The
//! engine measures one Copy, renders enough Copies to cover the visible area
//! plus headroom, and translates the Track by an offset that wraps modulo the
//! Sequence size, so the loop never shows a seam.
//!
//! # Architecture
//!
//! - [`Marquee`] owns the state and is driven entirely by
//!   [`HostEvent`](marquee_port::HostEvent)s; it talks back through a
//!   [`HostPort`](marquee_port::HostPort).
//! - Desktop Mode runs a per-frame loop with exponential velocity smoothing
//!   ([`motion`]). Mobile Mode hands the host a declarative
//!   [`NativeLoop`](marquee_port::NativeLoop) ([`mode`]). Reduced motion pins
//!   the Track.
//! - Exactly one strategy writes the transform at any time.
//!
//! # Example
//!
//! ```ignore
//! let options = MarqueeOptions::from_json(json)?;
//! let mut marquee = Marquee::new(host, options);
//! marquee.mount();
//! // host callbacks:
//! marquee.dispatch(HostEvent::Frame { handle, timestamp_ms });
//! // teardown:
//! marquee.unmount();
//! ```

mod engine;
pub mod interaction;
pub mod layout;
pub mod measure;
pub mod mode;
pub mod motion;
pub mod options;
pub mod readiness;
pub mod tuning;
pub mod watcher;

pub use engine::{Lifecycle, Marquee, MarqueeSnapshot};
pub use layout::ItemRenderer;
pub use measure::SizeSource;
pub use mode::{StrategyKind, ViewportMode};
pub use options::{CssLength, Diagnostics, HoverBehavior, MarqueeOptions, OptionsError};
pub use tuning::EngineTuning;
pub use watcher::ObserverKind;

pub use marquee_port::{Direction, HostEvent, HostPort, LogoItem};
