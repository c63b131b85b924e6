// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! DOM construction from a [`TrackLayout`] and the CSS strings it needs.

use marquee_port::{
    CopyLayout, FadeOverlay, ImageLayout, ItemContent, ItemLayout, NativeLoop, Orientation,
    TrackLayout,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

/// Id of the shared stylesheet injected once per document.
pub const BASE_STYLE_ID: &str = "marquee-base-style";

/// Rules shared by every marquee on the page.
pub const BASE_CSS: &str = "\
.marquee{position:relative;overflow:hidden;}\
.marquee__track{display:flex;width:max-content;will-change:transform;}\
.marquee__track--vertical{flex-direction:column;width:auto;height:max-content;}\
.marquee__list{display:flex;align-items:center;flex-shrink:0;margin:0;padding:0;list-style:none;}\
.marquee__track--vertical .marquee__list{flex-direction:column;}\
.marquee__item{flex-shrink:0;line-height:0;}\
.marquee__item img{display:block;width:auto;object-fit:contain;user-select:none;}\
.marquee__item--scale img{transition:transform .3s ease;}\
.marquee__item--scale:hover img{transform:scale(1.2);}\
.marquee__fade{position:absolute;pointer-events:none;z-index:1;}";

/// `transform` value translating the Track by `-offset`.
pub fn transform_value(orientation: Orientation, offset: f64) -> String {
    let shift = -offset;
    match orientation {
        Orientation::Horizontal => format!("translate3d({shift}px, 0, 0)"),
        Orientation::Vertical => format!("translate3d(0, {shift}px, 0)"),
    }
}

/// `@keyframes` rule moving the Track by one Sequence.
pub fn keyframes_css(name: &str, native: &NativeLoop) -> String {
    let end = transform_value(native.orientation, native.distance);
    let start = transform_value(native.orientation, 0.0);
    format!("@keyframes {name}{{from{{transform:{start};}}to{{transform:{end};}}}}")
}

/// `animation` shorthand running [`keyframes_css`] forever.
pub fn animation_value(name: &str, native: &NativeLoop) -> String {
    let direction = if native.reverse { "reverse" } else { "normal" };
    format!(
        "{name} {:.3}s linear 0s infinite {direction}",
        native.duration_secs
    )
}

/// Background of an edge fade. `start` is the leading edge.
pub fn fade_gradient(orientation: Orientation, start: bool, color: &str) -> String {
    let towards = match (orientation, start) {
        (Orientation::Horizontal, true) => "right",
        (Orientation::Horizontal, false) => "left",
        (Orientation::Vertical, true) => "bottom",
        (Orientation::Vertical, false) => "top",
    };
    format!("linear-gradient(to {towards}, {color}, transparent)")
}

fn create(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    document.create_element(tag)?.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

/// Region wrapper plus the (still empty) Track.
pub fn build_region(
    document: &Document,
    layout: &TrackLayout,
) -> Result<(HtmlElement, HtmlElement), JsValue> {
    let region = create(document, "div")?;
    region.set_class_name("marquee");
    region.set_attribute("role", "region")?;
    region.set_attribute("aria-label", &layout.aria_label)?;
    let style = region.style();
    style.set_property("width", &layout.style.width)?;
    if layout.orientation == Orientation::Vertical {
        style.set_property("height", "100%")?;
    }
    style.set_property("--marquee-logo-height", &format!("{}px", layout.style.logo_height))?;
    style.set_property("--marquee-gap", &format!("{}px", layout.style.gap))?;

    let track = create(document, "div")?;
    track.set_class_name(match layout.orientation {
        Orientation::Horizontal => "marquee__track",
        Orientation::Vertical => "marquee__track marquee__track--vertical",
    });
    region.append_child(&track)?;

    if let Some(fade) = &layout.fade {
        for start in [true, false] {
            let child = build_fade(document, layout.orientation, start, fade)?;
            region.append_child(&child)?;
        }
    }
    Ok((region, track))
}

fn build_fade(
    document: &Document,
    orientation: Orientation,
    start: bool,
    fade: &FadeOverlay,
) -> Result<HtmlElement, JsValue> {
    let overlay = create(document, "div")?;
    overlay.set_class_name(if start {
        "marquee__fade marquee__fade--start"
    } else {
        "marquee__fade marquee__fade--end"
    });
    overlay.set_attribute("aria-hidden", "true")?;
    let style = overlay.style();
    style.set_property("background", &fade_gradient(orientation, start, &fade.color))?;
    let edge = match (orientation, start) {
        (Orientation::Horizontal, true) => "left",
        (Orientation::Horizontal, false) => "right",
        (Orientation::Vertical, true) => "top",
        (Orientation::Vertical, false) => "bottom",
    };
    style.set_property(edge, "0")?;
    match orientation {
        Orientation::Horizontal => {
            style.set_property("top", "0")?;
            style.set_property("bottom", "0")?;
            style.set_property("width", "clamp(24px, 8%, 120px)")?;
        }
        Orientation::Vertical => {
            style.set_property("left", "0")?;
            style.set_property("right", "0")?;
            style.set_property("height", "clamp(24px, 8%, 120px)")?;
        }
    }
    Ok(overlay)
}

/// One Copy as a list.
pub fn build_copy(
    document: &Document,
    layout: &TrackLayout,
    copy: &CopyLayout,
) -> Result<HtmlElement, JsValue> {
    let list = create(document, "ul")?;
    list.set_class_name("marquee__list");
    list.set_attribute("role", "list")?;
    list.set_attribute("data-copy", &copy.index.to_string())?;
    if copy.hidden {
        list.set_attribute("aria-hidden", "true")?;
    }
    let style = list.style();
    let gap = format!("{}px", layout.style.gap);
    style.set_property("gap", &gap)?;
    style.set_property(
        match layout.orientation {
            Orientation::Horizontal => "padding-right",
            Orientation::Vertical => "padding-bottom",
        },
        &gap,
    )?;
    for item in &copy.items {
        let child = build_item(document, layout, copy.hidden, item)?;
        list.append_child(&child)?;
    }
    Ok(list)
}

fn build_item(
    document: &Document,
    layout: &TrackLayout,
    hidden: bool,
    item: &ItemLayout,
) -> Result<HtmlElement, JsValue> {
    let li = create(document, "li")?;
    li.set_class_name(if item.scale_on_hover {
        "marquee__item marquee__item--scale"
    } else {
        "marquee__item"
    });
    li.set_attribute("role", "listitem")?;
    li.set_attribute("data-key", &item.key)?;

    let holder: Element = match &item.href {
        Some(href) => {
            let link = create(document, "a")?;
            link.set_attribute("href", href)?;
            link.set_attribute("target", "_blank")?;
            link.set_attribute("rel", "noreferrer noopener")?;
            if let Some(label) = &item.link_label {
                link.set_attribute("aria-label", label)?;
            }
            if hidden {
                link.set_attribute("tabindex", "-1")?;
            }
            li.append_child(&link)?;
            link.into()
        }
        None => li.clone().into(),
    };
    if let Some(title) = &item.title {
        holder.set_attribute("title", title)?;
    }

    match &item.content {
        ItemContent::Image(image) => {
            let child = build_image(document, layout.style.logo_height, image)?;
            holder.append_child(&child)?;
        }
        ItemContent::Custom { markup } => holder.set_inner_html(markup),
    }
    Ok(li)
}

fn build_image(
    document: &Document,
    logo_height: f64,
    image: &ImageLayout,
) -> Result<HtmlElement, JsValue> {
    let img = create(document, "img")?;
    img.set_attribute("src", &image.src)?;
    img.set_attribute("alt", &image.alt)?;
    img.set_attribute("loading", image.loading.as_str())?;
    img.set_attribute("decoding", "async")?;
    img.set_attribute("draggable", "false")?;
    if image.high_priority {
        img.set_attribute("fetchpriority", "high")?;
    }
    if let Some(width) = image.width {
        img.set_attribute("width", &width.to_string())?;
    }
    let height = image.height.unwrap_or(logo_height);
    img.set_attribute("height", &height.to_string())?;
    img.style().set_property("height", &format!("{logo_height}px"))?;
    Ok(img)
}
