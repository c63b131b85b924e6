// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Construction-time options for a marquee instance.

use marquee_port::{Direction, LogoItem, Orientation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Error type for option parsing and validation.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// Malformed JSON or a field of the wrong type.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed but unusable value.
    #[error("invalid option: {0}")]
    Invalid(String),
}

/// CSS length accepted for `width`: a bare number means pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CssLength {
    /// Pixel count.
    Pixels(f64),
    /// Any CSS length expression (`"100%"`, `"40rem"`).
    Css(String),
}

impl Default for CssLength {
    fn default() -> Self {
        Self::Css("100%".into())
    }
}

impl CssLength {
    /// Render as a CSS value.
    pub fn to_css(&self) -> String {
        match self {
            Self::Pixels(px) => format!("{px}px"),
            Self::Css(raw) => raw.clone(),
        }
    }
}

/// Per-instance diagnostics switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Emit a `trace!` event for every motion tick.
    pub verbose: bool,
}

/// How hovering affects the Motion Loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverBehavior {
    /// Hover has no effect on velocity.
    Unaffected,
    /// While hovered, ease towards this speed (px/s, `0` pauses).
    Override(f64),
}

/// Options recognised by the engine, mirroring the JSON configuration surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarqueeOptions {
    /// Items forming one Sequence, in order.
    pub logos: Vec<LogoItem>,
    /// Pixels per second; a negative value reverses the direction.
    pub speed: f64,
    /// Travel direction.
    pub direction: Direction,
    /// Region width; vertical tracks fill their parent's height.
    pub width: CssLength,
    /// Item height in pixels.
    pub logo_height: f64,
    /// Space between items in pixels.
    pub gap: f64,
    /// Pause while hovered (ignored when `hover_speed` is set).
    pub pause_on_hover: Option<bool>,
    /// Speed magnitude while hovered, in px/s; `0` pauses.
    ///
    /// The sign is ignored: hovering travels the same way as `speed`.
    pub hover_speed: Option<f64>,
    /// Fade the leading and trailing edges.
    pub fade_out: bool,
    /// Color the edges fade into.
    pub fade_out_color: Option<String>,
    /// Scale items up on hover.
    pub scale_on_hover: bool,
    /// Accessible label of the region.
    pub aria_label: String,
    /// Diagnostics switches.
    pub diagnostics: Diagnostics,
}

impl Default for MarqueeOptions {
    fn default() -> Self {
        Self {
            logos: Vec::new(),
            speed: 120.0,
            direction: Direction::Left,
            width: CssLength::default(),
            logo_height: 28.0,
            gap: 32.0,
            pause_on_hover: None,
            hover_speed: None,
            fade_out: false,
            fade_out_color: None,
            scale_on_hover: false,
            aria_label: "Partner logos".into(),
            diagnostics: Diagnostics::default(),
        }
    }
}

/// Fallback color for the edge fade.
pub const DEFAULT_FADE_COLOR: &str = "#ffffff";

impl MarqueeOptions {
    /// Options with the given items and defaults elsewhere.
    pub fn with_logos(logos: Vec<LogoItem>) -> Self {
        Self {
            logos,
            ..Self::default()
        }
    }

    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.speed.is_finite() {
            return Err(OptionsError::Invalid(format!("speed must be finite, got {}", self.speed)));
        }
        if let Some(hover) = self.hover_speed {
            if !hover.is_finite() {
                return Err(OptionsError::Invalid(format!(
                    "hoverSpeed must be finite, got {hover}"
                )));
            }
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            return Err(OptionsError::Invalid(format!("gap must be >= 0, got {}", self.gap)));
        }
        if !(self.logo_height.is_finite() && self.logo_height > 0.0) {
            return Err(OptionsError::Invalid(format!(
                "logoHeight must be > 0, got {}",
                self.logo_height
            )));
        }
        if let CssLength::Pixels(px) = self.width {
            if !(px.is_finite() && px >= 0.0) {
                return Err(OptionsError::Invalid(format!("width must be >= 0, got {px}")));
            }
        }
        Ok(())
    }

    /// Replace unusable numbers with safe values instead of failing.
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.speed.is_finite() {
            warn!(speed = self.speed, "non-finite speed, track will stay still");
            self.speed = 0.0;
        }
        if self.hover_speed.is_some_and(|v| !v.is_finite()) {
            warn!("non-finite hoverSpeed ignored");
            self.hover_speed = None;
        }
        if !(self.gap.is_finite() && self.gap >= 0.0) {
            warn!(gap = self.gap, "invalid gap, using default");
            self.gap = defaults.gap;
        }
        if !(self.logo_height.is_finite() && self.logo_height > 0.0) {
            warn!(logo_height = self.logo_height, "invalid logoHeight, using default");
            self.logo_height = defaults.logo_height;
        }
        self
    }

    /// Axis of travel.
    pub fn orientation(&self) -> Orientation {
        self.direction.orientation()
    }

    /// `+1` or `-1`: direction sign times the sign of `speed`.
    pub fn travel_sign(&self) -> f64 {
        let speed_sign = if self.speed < 0.0 { -1.0 } else { 1.0 };
        self.direction.sign() * speed_sign
    }

    /// Velocity the loop settles at when not hovered.
    pub fn base_velocity(&self) -> f64 {
        self.speed.abs() * self.travel_sign()
    }

    /// Resolve `hoverSpeed` / `pauseOnHover`; `hoverSpeed` wins.
    ///
    /// The override keeps the travel sign so a slower hover speed slows the
    /// Track down rather than turning it around.
    pub fn hover_behavior(&self) -> HoverBehavior {
        match (self.hover_speed, self.pause_on_hover) {
            (Some(speed), _) => HoverBehavior::Override(speed.abs() * self.travel_sign()),
            (None, Some(true)) => HoverBehavior::Override(0.0),
            _ => HoverBehavior::Unaffected,
        }
    }

    /// Edge fade color.
    pub fn fade_color(&self) -> &str {
        self.fade_out_color.as_deref().unwrap_or(DEFAULT_FADE_COLOR)
    }
}
