// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! [`HostPort`] over the browser DOM.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use js_sys::{Function, Reflect};
use marquee_core::Marquee;
use marquee_port::{
    Extent, FrameHandle, HostEvent, HostPort, ImageStatus, MeasureTarget, NativeLoop,
    Orientation, PortError, TimerHandle, TrackLayout,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    HtmlImageElement, ResizeObserver, Window,
};

use crate::dom;

/// Engine shared between the exported handle and the host callbacks.
pub type SharedMarquee = Rc<RefCell<Marquee<WebHost>>>;
/// Non-owning handle held by callbacks.
pub type WeakMarquee = Weak<RefCell<Marquee<WebHost>>>;

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

static NEXT_INSTANCE: AtomicU32 = AtomicU32::new(1);

pub(crate) fn warn(message: &str, err: &JsValue) {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    web_sys::console::warn_1(&format!("marquee: {message}: {detail}").into());
}

/// Run `f` on the engine if it is still alive and not already borrowed.
pub(crate) fn with_engine(engine: &WeakMarquee, f: impl FnOnce(&mut Marquee<WebHost>)) {
    let Some(engine) = engine.upgrade() else {
        return;
    };
    let Ok(mut marquee) = engine.try_borrow_mut() else {
        web_sys::console::warn_1(&"marquee: re-entrant host callback dropped".into());
        return;
    };
    f(&mut marquee);
}

fn dispatch_to(engine: &WeakMarquee, event: HostEvent) {
    with_engine(engine, |marquee| marquee.dispatch(event));
}

/// An event listener removed again on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(callback);
        if passive {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        }
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    /// Listener forwarding a fixed event to the engine.
    fn forward(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        engine: &WeakMarquee,
        event: HostEvent,
    ) -> Result<Self, JsValue> {
        let engine = engine.clone();
        Self::attach(target, kind, passive, move |_| dispatch_to(&engine, event))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            warn("listener removal failed", &err);
        }
    }
}

struct SizeObserver {
    observer: ResizeObserver,
    _callback: Closure<dyn FnMut()>,
}

/// Browser host: one container element, one Track.
pub struct WebHost {
    window: Window,
    document: Document,
    container: HtmlElement,
    engine: WeakMarquee,
    animation_name: String,
    next_id: u64,
    frames: HashMap<u64, i32>,
    timers: HashMap<u64, i32>,
    region: Option<HtmlElement>,
    track: Option<HtmlElement>,
    first_copy: Option<HtmlElement>,
    rendered: Option<TrackLayout>,
    keyframes: Option<HtmlElement>,
    size_observer: Option<SizeObserver>,
    resize_listeners: Vec<Listener>,
    image_listeners: Vec<Listener>,
    page_listeners: Vec<Listener>,
}

impl WebHost {
    /// Host rendering into `container`. Callbacks reach the engine through `engine`.
    pub fn new(
        window: Window,
        document: Document,
        container: HtmlElement,
        engine: WeakMarquee,
    ) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self {
            window,
            document,
            container,
            engine,
            animation_name: format!("marquee-loop-{instance}"),
            next_id: 0,
            frames: HashMap::new(),
            timers: HashMap::new(),
            region: None,
            track: None,
            first_copy: None,
            rendered: None,
            keyframes: None,
            size_observer: None,
            resize_listeners: Vec::new(),
            image_listeners: Vec::new(),
            page_listeners: Vec::new(),
        }
    }

    /// Install the page-level listeners: hover, touch, breakpoint,
    /// reduced motion, and document visibility.
    ///
    /// `mobile_breakpoint` is the engine's, so the media query flips at the
    /// same width that picks the mode at mount.
    pub fn connect(&mut self, mobile_breakpoint: f64) -> Result<(), JsValue> {
        self.ensure_base_style()?;
        let container: &EventTarget = self.container.as_ref();
        let mut listeners = vec![
            Listener::forward(container, "mouseenter", false, &self.engine, HostEvent::PointerEnter)?,
            Listener::forward(container, "mouseleave", false, &self.engine, HostEvent::PointerLeave)?,
            Listener::forward(container, "touchstart", true, &self.engine, HostEvent::TouchStart)?,
            Listener::forward(container, "touchend", true, &self.engine, HostEvent::TouchEnd)?,
            Listener::forward(container, "touchcancel", true, &self.engine, HostEvent::TouchCancel)?,
        ];

        let breakpoint = format!("(max-width: {mobile_breakpoint}px)");
        if let Some(query) = self.window.match_media(&breakpoint)? {
            let engine = self.engine.clone();
            let window = self.window.clone();
            listeners.push(Listener::attach(&query, "change", false, move |_| {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or_default();
                dispatch_to(&engine, HostEvent::ViewportChanged { width });
            })?);
        }
        if let Some(query) = self.window.match_media(REDUCED_MOTION_QUERY)? {
            let engine = self.engine.clone();
            let source = query.clone();
            listeners.push(Listener::attach(&query, "change", false, move |_| {
                dispatch_to(&engine, HostEvent::ReducedMotionChanged(source.matches()));
            })?);
        }

        let engine = self.engine.clone();
        let document = self.document.clone();
        listeners.push(Listener::attach(
            &self.document,
            "visibilitychange",
            false,
            move |_| {
                dispatch_to(
                    &engine,
                    HostEvent::VisibilityChanged {
                        hidden: document.hidden(),
                    },
                );
            },
        )?);

        self.page_listeners = listeners;
        Ok(())
    }

    /// Drop every listener and remove the rendered region.
    pub fn disconnect(&mut self) {
        self.page_listeners.clear();
        self.image_listeners.clear();
        self.resize_listeners.clear();
        if let Some(observer) = self.size_observer.take() {
            observer.observer.disconnect();
        }
        if let Some(region) = self.region.take() {
            region.remove();
        }
        if let Some(style) = self.keyframes.take() {
            style.remove();
        }
        self.track = None;
        self.first_copy = None;
        self.rendered = None;
    }

    fn ensure_base_style(&self) -> Result<(), JsValue> {
        if self.document.get_element_by_id(dom::BASE_STYLE_ID).is_some() {
            return Ok(());
        }
        let style = self.document.create_element("style")?;
        style.set_id(dom::BASE_STYLE_ID);
        style.set_text_content(Some(dom::BASE_CSS));
        if let Some(head) = self.document.head() {
            head.append_child(&style)?;
        }
        Ok(())
    }

    fn next_handle(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn try_render(&mut self, layout: &TrackLayout) -> Result<(), JsValue> {
        let frame_unchanged = self.rendered.as_ref().is_some_and(|prev| {
            prev.aria_label == layout.aria_label
                && prev.orientation == layout.orientation
                && prev.style == layout.style
                && prev.fade == layout.fade
        });
        let reuse = if frame_unchanged { self.track.clone() } else { None };
        let track = match reuse {
            Some(track) => track,
            None => {
                if let Some(old) = self.region.take() {
                    old.remove();
                }
                let (region, track) = dom::build_region(&self.document, layout)?;
                self.container.append_child(&region)?;
                self.region = Some(region);
                self.track = Some(track.clone());
                self.rendered = None;
                track
            }
        };

        let previous = self.rendered.take().map(|prev| prev.copies).unwrap_or_default();
        for (position, copy) in layout.copies.iter().enumerate() {
            let existing = track.children().item(position as u32);
            if existing.is_some() && previous.get(position) == Some(copy) {
                continue;
            }
            let element = dom::build_copy(&self.document, layout, copy)?;
            match existing {
                Some(old) => old.replace_with_with_node_1(&element)?,
                None => {
                    track.append_child(&element)?;
                }
            }
            if position == 0 {
                self.watch_first_copy(element)?;
            }
        }
        while track.child_element_count() as usize > layout.copies.len() {
            match track.last_element_child() {
                Some(extra) => extra.remove(),
                None => break,
            }
        }
        self.rendered = Some(layout.clone());
        Ok(())
    }

    fn watch_first_copy(&mut self, element: HtmlElement) -> Result<(), JsValue> {
        if let Some(observer) = &self.size_observer {
            if let Some(old) = &self.first_copy {
                observer.observer.unobserve(old);
            }
            observer.observer.observe(&element);
        }

        self.image_listeners.clear();
        let images = element.query_selector_all("img")?;
        for index in 0..images.length() {
            let Some(node) = images.item(index) else {
                continue;
            };
            let target: &EventTarget = node.as_ref();
            let event = HostEvent::ImageSettled {
                index: index as usize,
            };
            self.image_listeners
                .push(Listener::forward(target, "load", false, &self.engine, event)?);
            self.image_listeners
                .push(Listener::forward(target, "error", false, &self.engine, event)?);
        }
        self.first_copy = Some(element);
        Ok(())
    }

    fn try_install_native_loop(&mut self, native: &NativeLoop) -> Result<(), JsValue> {
        let style = match &self.keyframes {
            Some(style) => style.clone(),
            None => {
                let style = self
                    .document
                    .create_element("style")?
                    .dyn_into::<HtmlElement>()
                    .map_err(JsValue::from)?;
                if let Some(head) = self.document.head() {
                    head.append_child(&style)?;
                }
                self.keyframes = Some(style.clone());
                style
            }
        };
        style.set_text_content(Some(&dom::keyframes_css(&self.animation_name, native)));
        if let Some(track) = self.track_style() {
            track.set_property(
                "animation",
                &dom::animation_value(&self.animation_name, native),
            )?;
            track.set_property("animation-play-state", "running")?;
        }
        Ok(())
    }

    fn track_style(&self) -> Option<web_sys::CssStyleDeclaration> {
        self.track.as_ref().map(HtmlElement::style)
    }
}

fn extent_of(element: &Element) -> Extent {
    let rect = element.get_bounding_client_rect();
    Extent::new(rect.width(), rect.height())
}

impl HostPort for WebHost {
    fn measure(&self, target: MeasureTarget) -> Extent {
        match target {
            MeasureTarget::FirstCopy => self
                .first_copy
                .as_ref()
                .map(|copy| extent_of(copy))
                .unwrap_or_default(),
            MeasureTarget::Container => extent_of(&self.container),
            MeasureTarget::Viewport => {
                let read = |value: Result<JsValue, JsValue>| {
                    value.ok().and_then(|v| v.as_f64()).unwrap_or_default()
                };
                Extent::new(
                    read(self.window.inner_width()),
                    read(self.window.inner_height()),
                )
            }
        }
    }

    fn image_statuses(&self) -> Vec<ImageStatus> {
        let Some(copy) = &self.first_copy else {
            return Vec::new();
        };
        let Ok(images) = copy.query_selector_all("img") else {
            return Vec::new();
        };
        (0..images.length())
            .filter_map(|index| images.item(index))
            .map(|node| match node.dyn_into::<HtmlImageElement>() {
                Ok(img) if !img.complete() => ImageStatus::Pending,
                _ => ImageStatus::Settled,
            })
            .collect()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches())
    }

    fn document_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn request_frame(&mut self) -> FrameHandle {
        let id = self.next_handle();
        let engine = self.engine.clone();
        let callback = Closure::once_into_js(move |timestamp_ms: f64| {
            with_engine(&engine, |marquee| {
                marquee.host_mut().frames.remove(&id);
                marquee.dispatch(HostEvent::Frame {
                    handle: FrameHandle(id),
                    timestamp_ms,
                });
            });
        });
        match self
            .window
            .request_animation_frame(callback.unchecked_ref::<Function>())
        {
            Ok(browser_id) => {
                self.frames.insert(id, browser_id);
            }
            Err(err) => warn("requestAnimationFrame failed", &err),
        }
        FrameHandle(id)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Some(browser_id) = self.frames.remove(&handle.0) {
            if let Err(err) = self.window.cancel_animation_frame(browser_id) {
                warn("cancelAnimationFrame failed", &err);
            }
        }
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerHandle {
        let id = self.next_handle();
        let engine = self.engine.clone();
        let callback = Closure::once_into_js(move || {
            with_engine(&engine, |marquee| {
                marquee.host_mut().timers.remove(&id);
                marquee.dispatch(HostEvent::Timer(TimerHandle(id)));
            });
        });
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<Function>(),
                millis,
            ) {
            Ok(browser_id) => {
                self.timers.insert(id, browser_id);
            }
            Err(err) => warn("setTimeout failed", &err),
        }
        TimerHandle(id)
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        if let Some(browser_id) = self.timers.remove(&handle.0) {
            self.window.clear_timeout_with_handle(browser_id);
        }
    }

    fn observe_size(&mut self) -> Result<(), PortError> {
        let supported = Reflect::has(&self.window, &JsValue::from_str("ResizeObserver"))
            .unwrap_or(false);
        if !supported {
            return Err(PortError::Unsupported("ResizeObserver".into()));
        }
        let engine = self.engine.clone();
        let callback =
            Closure::<dyn FnMut()>::new(move || dispatch_to(&engine, HostEvent::Resized));
        let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| PortError::Backend(format!("{err:?}")))?;
        observer.observe(&self.container);
        if let Some(copy) = &self.first_copy {
            observer.observe(copy);
        }
        self.size_observer = Some(SizeObserver {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    fn listen_window_resize(&mut self) {
        let window: &EventTarget = self.window.as_ref();
        let listeners = ["resize", "orientationchange"]
            .into_iter()
            .map(|kind| Listener::forward(window, kind, true, &self.engine, HostEvent::Resized))
            .collect::<Result<Vec<_>, _>>();
        match listeners {
            Ok(listeners) => self.resize_listeners = listeners,
            Err(err) => warn("window resize listener failed", &err),
        }
    }

    fn disconnect_observers(&mut self) {
        if let Some(observer) = self.size_observer.take() {
            observer.observer.disconnect();
        }
        self.resize_listeners.clear();
    }

    fn render_track(&mut self, layout: &TrackLayout) {
        if let Err(err) = self.try_render(layout) {
            warn("render failed", &err);
        }
    }

    fn write_transform(&mut self, orientation: Orientation, offset: f64) {
        if let Some(style) = self.track_style() {
            if let Err(err) =
                style.set_property("transform", &dom::transform_value(orientation, offset))
            {
                warn("transform write failed", &err);
            }
        }
    }

    fn install_native_loop(&mut self, native: &NativeLoop) {
        if let Err(err) = self.try_install_native_loop(native) {
            warn("native loop install failed", &err);
        }
    }

    fn set_native_loop_paused(&mut self, paused: bool) {
        if let Some(track) = self.track_style() {
            let state = if paused { "paused" } else { "running" };
            if let Err(err) = track.set_property("animation-play-state", state) {
                warn("play-state write failed", &err);
            }
        }
    }

    fn remove_native_loop(&mut self) {
        if let Some(track) = self.track_style() {
            for property in ["animation", "animation-play-state"] {
                if let Err(err) = track.remove_property(property) {
                    warn("animation reset failed", &err);
                }
            }
        }
        if let Some(style) = &self.keyframes {
            style.set_text_content(None);
        }
    }
}
