// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for marquee crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`host`] - Recording [`HostPort`](marquee_port::HostPort) with scripted measurements
//! - [`pump`] - Frame and timer pumps that drive an engine like a browser
//! - [`fixtures`] - Logo lists and option presets

pub mod fixtures;
pub mod host;
pub mod pump;

pub use fixtures::{logos, options};
pub use host::{MockHost, MockObserver};
pub use pump::{fire_frames, fire_timers, mount_settled, FrameClock, FRAME_60HZ_MS};
