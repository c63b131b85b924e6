// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Builds the [`TrackLayout`] handed to the host.

use marquee_port::{
    CopyLayout, FadeOverlay, ImageLayout, ItemContent, ItemLayout, Loading, LogoItem, TrackLayout,
    TrackStyle,
};

use crate::options::MarqueeOptions;

/// Custom item rendering hook.
///
/// Receives the item and its stable key and returns markup that replaces the
/// default image element. The markup is inserted as-is.
pub trait ItemRenderer {
    /// Render one item.
    fn render(&self, item: &LogoItem, key: &str) -> String;
}

impl<F> ItemRenderer for F
where
    F: Fn(&LogoItem, &str) -> String,
{
    fn render(&self, item: &LogoItem, key: &str) -> String {
        self(item, key)
    }
}

/// Stable key of item `index` within Copy `copy`.
pub fn item_key(copy: usize, index: usize) -> String {
    format!("{copy}-{index}")
}

fn default_content(item: &LogoItem) -> ItemContent {
    ItemContent::Image(ImageLayout {
        src: item.src.clone(),
        alt: item.alt.clone().unwrap_or_default(),
        width: item.width,
        height: item.height,
        loading: if item.priority {
            Loading::Eager
        } else {
            Loading::Lazy
        },
        high_priority: item.priority,
    })
}

/// Lay out `copy_count` Copies of the options' items.
///
/// Only Copy `0` is exposed to assistive technology.
pub fn build_layout(
    options: &MarqueeOptions,
    copy_count: usize,
    renderer: Option<&dyn ItemRenderer>,
) -> TrackLayout {
    let copies = (0..copy_count)
        .map(|copy| CopyLayout {
            index: copy,
            hidden: copy > 0,
            items: options
                .logos
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    let key = item_key(copy, index);
                    let content = match renderer {
                        Some(renderer) => ItemContent::Custom {
                            markup: renderer.render(item, &key),
                        },
                        None => default_content(item),
                    };
                    ItemLayout {
                        href: item.href.clone(),
                        link_label: item
                            .href
                            .as_ref()
                            .and_then(|_| item.accessible_label().map(str::to_owned)),
                        title: item.title.clone(),
                        scale_on_hover: options.scale_on_hover,
                        content,
                        key,
                    }
                })
                .collect(),
        })
        .collect();

    TrackLayout {
        aria_label: options.aria_label.clone(),
        orientation: options.orientation(),
        style: TrackStyle {
            width: options.width.to_css(),
            logo_height: options.logo_height,
            gap: options.gap,
        },
        fade: options.fade_out.then(|| FadeOverlay {
            color: options.fade_color().to_owned(),
        }),
        copies,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use marquee_port::Direction;

    fn options() -> MarqueeOptions {
        MarqueeOptions::with_logos(vec![
            LogoItem {
                alt: Some("Acme".into()),
                href: Some("https://acme.example".into()),
                priority: true,
                ..LogoItem::image("/acme.svg")
            },
            LogoItem::image("/globex.svg"),
        ])
    }

    #[test]
    fn only_first_copy_is_exposed() {
        let layout = build_layout(&options(), 4, None);
        assert_eq!(layout.copy_count(), 4);
        assert!(!layout.copies[0].hidden);
        assert!(layout.copies[1..].iter().all(|copy| copy.hidden));
    }

    #[test]
    fn keys_are_unique_and_order_is_kept() {
        let layout = build_layout(&options(), 2, None);
        let keys: Vec<&str> = layout
            .copies
            .iter()
            .flat_map(|copy| copy.items.iter().map(|item| item.key.as_str()))
            .collect();
        assert_eq!(keys, ["0-0", "0-1", "1-0", "1-1"]);
        let ItemContent::Image(first) = &layout.copies[1].items[0].content else {
            panic!("expected image");
        };
        assert_eq!(first.src, "/acme.svg");
    }

    #[test]
    fn priority_controls_loading() {
        let layout = build_layout(&options(), 1, None);
        let loads: Vec<Loading> = layout.copies[0]
            .items
            .iter()
            .filter_map(|item| match &item.content {
                ItemContent::Image(image) => Some(image.loading),
                ItemContent::Custom { .. } => None,
            })
            .collect();
        assert_eq!(loads, [Loading::Eager, Loading::Lazy]);
    }

    #[test]
    fn links_carry_accessible_labels() {
        let layout = build_layout(&options(), 1, None);
        assert_eq!(layout.copies[0].items[0].link_label.as_deref(), Some("Acme"));
        assert_eq!(layout.copies[0].items[1].link_label, None);
    }

    #[test]
    fn renderer_replaces_default_content() {
        let renderer = |item: &LogoItem, key: &str| format!("<b data-key=\"{key}\">{}</b>", item.src);
        let layout = build_layout(&options(), 1, Some(&renderer));
        assert_eq!(
            layout.copies[0].items[1].content,
            ItemContent::Custom {
                markup: "<b data-key=\"0-1\">/globex.svg</b>".into()
            }
        );
    }

    #[test]
    fn fade_and_orientation_follow_options() {
        let mut opts = options();
        opts.fade_out = true;
        opts.direction = Direction::Up;
        let layout = build_layout(&opts, 1, None);
        assert_eq!(layout.fade.map(|fade| fade.color), Some("#ffffff".to_owned()));
        assert_eq!(layout.orientation, marquee_port::Orientation::Vertical);
    }
}
