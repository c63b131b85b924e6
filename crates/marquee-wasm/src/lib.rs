// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! wasm-bindgen bindings for the marquee engine.
//!
//! [`WebHost`] implements the host port over `web-sys`: `requestAnimationFrame`,
//! `setTimeout`, `ResizeObserver` (with a window-resize fallback), media
//! queries for the breakpoint and reduced motion, and CSS keyframes for the
//! Mobile Mode loop. [`WasmMarquee`] is the JavaScript-facing handle.
//!
//! # Usage (from JavaScript)
//!
//! ```js
//! import init, { WasmMarquee } from 'marquee-wasm';
//!
//! await init();
//! const marquee = new WasmMarquee(document.getElementById('partners'), JSON.stringify({
//!   logos: [{ src: '/acme.svg', alt: 'Acme', href: 'https://acme.example' }],
//!   speed: 80,
//!   pauseOnHover: true,
//! }));
//! marquee.mount();
//! console.log(marquee.snapshot());
//! marquee.destroy();
//! ```
#![deny(missing_docs)]

mod dom;
mod host;

use std::cell::RefCell;
use std::rc::Rc;

use marquee_core::{LogoItem, Marquee, MarqueeOptions};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use dom::{animation_value, fade_gradient, keyframes_css, transform_value};
pub use host::{SharedMarquee, WeakMarquee, WebHost};

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One marquee bound to a container element.
#[wasm_bindgen]
pub struct WasmMarquee {
    inner: SharedMarquee,
}

#[wasm_bindgen]
impl WasmMarquee {
    /// Parse `options_json` and prepare a marquee inside `container`.
    ///
    /// Nothing is rendered until [`mount`](Self::mount).
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement, options_json: &str) -> Result<WasmMarquee, JsValue> {
        #[cfg(feature = "console-panic")]
        console_error_panic_hook::set_once();

        let options = MarqueeOptions::from_json(options_json).map_err(js_error)?;
        let window = web_sys::window().ok_or_else(|| js_error("no window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;
        let inner = Rc::new_cyclic(|engine| {
            RefCell::new(Marquee::new(
                WebHost::new(window, document, container, engine.clone()),
                options,
            ))
        });
        Ok(Self { inner })
    }

    /// Render the Track and start moving.
    pub fn mount(&self) -> Result<(), JsValue> {
        let mut marquee = self
            .inner
            .try_borrow_mut()
            .map_err(|_| js_error("marquee is busy"))?;
        let breakpoint = marquee.tuning().mobile_breakpoint;
        marquee.host_mut().connect(breakpoint)?;
        marquee.mount();
        Ok(())
    }

    /// Stop every frame, timer, observer, and listener and remove the Track.
    pub fn destroy(&self) -> Result<(), JsValue> {
        let mut marquee = self
            .inner
            .try_borrow_mut()
            .map_err(|_| js_error("marquee is busy"))?;
        marquee.unmount();
        marquee.host_mut().disconnect();
        Ok(())
    }

    /// Replace the logo list (JSON array of items) and rebuild the Track.
    #[wasm_bindgen(js_name = setLogos)]
    pub fn set_logos(&self, logos_json: &str) -> Result<(), JsValue> {
        let logos: Vec<LogoItem> = serde_json_array(logos_json)?;
        let mut marquee = self
            .inner
            .try_borrow_mut()
            .map_err(|_| js_error("marquee is busy"))?;
        marquee.replace_logos(logos);
        Ok(())
    }

    /// Current engine state as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let marquee = self
            .inner
            .try_borrow()
            .map_err(|_| js_error("marquee is busy"))?;
        serde_wasm_bindgen::to_value(&marquee.snapshot()).map_err(JsValue::from)
    }
}

fn serde_json_array(json: &str) -> Result<Vec<LogoItem>, JsValue> {
    let parsed = js_sys::JSON::parse(json)?;
    serde_wasm_bindgen::from_value(parsed).map_err(JsValue::from)
}
