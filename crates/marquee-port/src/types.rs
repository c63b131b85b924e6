// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core domain types for the host port contract.

use alloc::string::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis the Track scrolls along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Items laid out in a row; the Track moves along X.
    Horizontal,
    /// Items laid out in a column; the Track moves along Y.
    Vertical,
}

/// Visual travel direction of the Track content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    /// Content travels towards the left edge.
    #[default]
    Left,
    /// Content travels towards the right edge.
    Right,
    /// Content travels towards the top edge.
    Up,
    /// Content travels towards the bottom edge.
    Down,
}

impl Direction {
    /// Axis implied by this direction.
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    /// Sign applied to the offset: left/up grow the offset, right/down shrink it.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left | Self::Up => 1.0,
            Self::Right | Self::Down => -1.0,
        }
    }
}

/// Measured size of an element in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Extent {
    /// Create an extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size along the given axis.
    pub const fn along(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

/// Element a host is asked to measure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeasureTarget {
    /// Bounding rect of the first rendered Copy.
    FirstCopy,
    /// The region element containing the Track.
    Container,
    /// The layout viewport (window).
    Viewport,
}

/// Opaque handle for a scheduled animation-frame callback.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameHandle(pub u64);

/// Opaque handle for a fixed-delay timer.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimerHandle(pub u64);

/// Load state of one image inside the first Copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageStatus {
    /// Still fetching or decoding.
    Pending,
    /// Loaded or failed; either way its box no longer changes.
    Settled,
}

/// One caller-supplied entry of the loop.
///
/// Immutable once handed to the engine. `src` is an image URL for the
/// default renderer, or an arbitrary payload when a custom renderer is used.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LogoItem {
    /// Image URL or render payload.
    pub src: String,
    /// Alternative text for the image.
    pub alt: Option<String>,
    /// Tooltip/title text.
    pub title: Option<String>,
    /// Link target wrapping the item.
    pub href: Option<String>,
    /// Explicit width in pixels.
    pub width: Option<f64>,
    /// Explicit height in pixels.
    pub height: Option<f64>,
    /// Load eagerly with high fetch priority.
    pub priority: bool,
}

impl LogoItem {
    /// Item showing the image at `src`.
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            ..Self::default()
        }
    }

    /// Label announced for a linked item: title first, then alt text.
    pub fn accessible_label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.alt.as_deref())
            .filter(|label| !label.is_empty())
    }
}

/// Declarative, indefinitely repeating linear loop handed to the host.
///
/// The host animates the Track from offset `0` to `-distance` along
/// `orientation` over `duration_secs`, then repeats. `reverse` plays the
/// keyframes backwards, which is how rightward/downward travel is expressed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NativeLoop {
    /// Axis of travel.
    pub orientation: Orientation,
    /// Loop period in pixels (one Sequence).
    pub distance: f64,
    /// Seconds for one full period.
    pub duration_secs: f64,
    /// Play the keyframes in reverse.
    pub reverse: bool,
}
