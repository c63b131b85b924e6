// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Logo and option fixtures.

use marquee_core::{LogoItem, MarqueeOptions};

/// `count` image logos named `/logos/{i}.svg`, the first one prioritised.
pub fn logos(count: usize) -> Vec<LogoItem> {
    (0..count)
        .map(|i| LogoItem {
            alt: Some(format!("Logo {i}")),
            priority: i == 0,
            ..LogoItem::image(format!("/logos/{i}.svg"))
        })
        .collect()
}

/// Default options over [`logos`]`(count)`.
pub fn options(count: usize) -> MarqueeOptions {
    MarqueeOptions::with_logos(logos(count))
}
