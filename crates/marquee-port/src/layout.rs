// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Render description of a Track.
//!
//! The engine builds a [`TrackLayout`] and hands it to the host, which turns it
//! into real elements. These types carry no behaviour.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Orientation;

/// Eager vs. lazy image fetching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Loading {
    /// Fetch immediately.
    Eager,
    /// Fetch when near the viewport.
    Lazy,
}

impl Loading {
    /// HTML attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

/// Default image rendering of an item.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLayout {
    /// Image URL.
    pub src: String,
    /// Alternative text (empty for decorative images).
    pub alt: String,
    /// Explicit width in pixels.
    pub width: Option<f64>,
    /// Explicit height in pixels.
    pub height: Option<f64>,
    /// Fetch policy.
    pub loading: Loading,
    /// Request high fetch priority.
    pub high_priority: bool,
}

/// What sits inside an item slot.
#[derive(Clone, Debug, PartialEq)]
pub enum ItemContent {
    /// Default image element.
    Image(ImageLayout),
    /// Caller-rendered markup, inserted as-is.
    Custom {
        /// Trusted markup produced by the caller's renderer.
        markup: String,
    },
}

/// One item slot within a Copy.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemLayout {
    /// Stable key, unique across the Track (`"{copy}-{index}"`).
    pub key: String,
    /// Link target wrapping the content.
    pub href: Option<String>,
    /// Accessible name for the link.
    pub link_label: Option<String>,
    /// Tooltip text.
    pub title: Option<String>,
    /// Apply the hover-scale affordance.
    pub scale_on_hover: bool,
    /// Slot content.
    pub content: ItemContent,
}

/// One rendered list of the whole Sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct CopyLayout {
    /// Position of this Copy in the Track.
    pub index: usize,
    /// Hidden from assistive technology and excluded from tab order.
    pub hidden: bool,
    /// Items in caller order.
    pub items: Vec<ItemLayout>,
}

/// Sizing applied to the Track and its items.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackStyle {
    /// CSS width of the region (e.g. `"100%"`, `"640px"`).
    pub width: String,
    /// Item height in pixels.
    pub logo_height: f64,
    /// Space between items in pixels.
    pub gap: f64,
}

/// Edge fade overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FadeOverlay {
    /// CSS color the edges fade into.
    pub color: String,
}

/// Full render description of the region, Track, and Copies.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackLayout {
    /// Accessible label of the region.
    pub aria_label: String,
    /// Axis of travel.
    pub orientation: Orientation,
    /// Sizing.
    pub style: TrackStyle,
    /// Optional edge fade.
    pub fade: Option<FadeOverlay>,
    /// Copies in order; only the first is exposed to assistive technology.
    pub copies: Vec<CopyLayout>,
}

impl TrackLayout {
    /// Number of Copies.
    pub fn copy_count(&self) -> usize {
        self.copies.len()
    }
}
