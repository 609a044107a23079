//! Cosmetic page effects: scroll progress, nav highlight, anchors, reveal,
//! magnetic buttons, hero tilt, cursor glow and snap assist.
//!
//! Motion effects are skipped when the user prefers reduced motion.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::effects::{
    FrameThrottle, GlowFollower, MAGNETIC_STRENGTH_DEFAULT, MAGNETIC_STRENGTH_PRIMARY, Point,
    REVEAL_TARGETS, REVEAL_THRESHOLD, Rect, SNAP_DELAY_MS, SNAP_MIN_VIEWPORT_PX, active_section,
    magnetic_offset, scroll_progress, smooth_scroll_target, snap_target, tilt,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use js_sys::Array;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::console;
use crate::dom::{by_id, query_all};
use crate::wasm::{NAV_TOGGLE_ID, close_nav};

const HEADER_SELECTOR: &str = ".site-header";
const NAV_LINK_SELECTOR: &str = ".navbar a";
const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
const MAGNETIC_SELECTORS: [&str; 2] = [".btn", ".social-links a"];
const HERO_CARD_SELECTOR: &str = ".hero-card";
const SNAP_SECTION_SELECTOR: &str = "main > section";
const ACTIVE_SECTION_CLASS: &str = "active-section";
const GLOW_ID: &str = "cursorGlow";

const EFFECT_STYLES: &str = r"
    .navbar a.active-section{
      color: rgba(255,255,255,0.95) !important;
      background: rgba(34,211,238,0.12) !important;
      border: 1px solid rgba(34,211,238,0.20) !important;
      box-shadow: 0 0 0 1px rgba(34,211,238,0.05), 0 10px 30px rgba(0,0,0,0.25);
    }
    .reveal{
      opacity: 0;
      transform: translateY(20px) scale(0.98);
      filter: blur(6px);
      transition: opacity 650ms ease, transform 650ms ease, filter 650ms ease;
      will-change: transform, opacity, filter;
    }
    .reveal.show{
      opacity: 1;
      transform: translateY(0) scale(1);
      filter: blur(0);
    }
";

fn matches_media(window: &Window, query: &str) -> bool {
    window
        .match_media(query)
        .ok()
        .flatten()
        .is_some_and(|list| list.matches())
}

fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

fn pointer(event: &web_sys::Event) -> Option<Point> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(Point::new(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    ))
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn header_height(header: Option<&Element>) -> f64 {
    header.map_or(0.0, |h| client_rect(h).height)
}

fn scroll_to(window: &Window, top: f64, smooth: bool) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(if smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    window.scroll_to_with_scroll_to_options(&options);
}

fn html_elements(document: &Document, selector: &str) -> Vec<HtmlElement> {
    query_all(document, selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Progress bar and active-nav tracking, refreshed at most once per frame.
struct ScrollTracker {
    window: Window,
    document: Document,
    progress: Option<HtmlElement>,
    header: Option<Element>,
    nav_links: Vec<Element>,
    sections: Vec<HtmlElement>,
    throttle: FrameThrottle,
}

impl ScrollTracker {
    fn update(&self) {
        if let (Some(bar), Some(root)) = (&self.progress, self.document.document_element()) {
            let body_top = self.document.body().map_or(0, |b| b.scroll_top());
            let scroll_top = if root.scroll_top() != 0 {
                root.scroll_top()
            } else {
                body_top
            };
            let percent = scroll_progress(
                f64::from(scroll_top),
                f64::from(root.scroll_height()),
                f64::from(root.client_height()),
            );
            set_style(bar, "width", &format!("{percent}%"));
        }

        let tops: Vec<f64> = self
            .sections
            .iter()
            .map(|s| f64::from(s.offset_top()))
            .collect();
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let Some(active) = active_section(scroll_y, header_height(self.header.as_ref()), &tops)
        else {
            return;
        };
        for link in &self.nav_links {
            let _ = link.class_list().remove_1(ACTIVE_SECTION_CLASS);
        }
        if let Some(link) = self.nav_links.get(active) {
            let _ = link.class_list().add_1(ACTIVE_SECTION_CLASS);
        }
    }
}

fn create_progress_bar(document: &Document) -> Option<HtmlElement> {
    let bar = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let _ = bar.set_attribute("aria-hidden", "true");
    for (property, value) in [
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("height", "3px"),
        ("width", "0%"),
        ("z-index", "9999"),
        (
            "background",
            "linear-gradient(90deg, rgba(124,92,255,1), rgba(34,211,238,1))",
        ),
        ("box-shadow", "0 0 18px rgba(124,92,255,0.35)"),
    ] {
        set_style(&bar, property, value);
    }
    document.body()?.append_child(&bar).ok()?;
    Some(bar)
}

fn create_glow(document: &Document) -> Option<HtmlElement> {
    let glow = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    glow.set_id(GLOW_ID);
    let _ = glow.set_attribute("aria-hidden", "true");
    for (property, value) in [
        ("position", "fixed"),
        ("width", "22px"),
        ("height", "22px"),
        ("border-radius", "999px"),
        ("pointer-events", "none"),
        ("z-index", "9998"),
        ("mix-blend-mode", "screen"),
        ("filter", "blur(10px)"),
        (
            "background",
            "radial-gradient(circle, rgba(34,211,238,0.9), rgba(124,92,255,0.35), transparent 70%)",
        ),
        ("opacity", "0"),
    ] {
        set_style(&glow, property, value);
    }
    document.body()?.append_child(&glow).ok()?;
    Some(glow)
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Self-rescheduling glow animation. Dropping it cancels the pending frame
/// and releases the callback, which otherwise keeps itself alive.
struct GlowLoop {
    window: Window,
    slot: FrameSlot,
    frame_id: Rc<Cell<Option<i32>>>,
}

impl Drop for GlowLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            slot.take();
        }
    }
}

/// Page-wide effects for the landing page.
///
/// Dropping the handle detaches every listener and stops the glow loop, so
/// hosts keep it referenced for the life of the page.
#[wasm_bindgen]
pub struct EffectsApp {
    _listeners: Vec<EventListener>,
    _scroll_frame: Closure<dyn FnMut()>,
    _glow: Option<GlowLoop>,
    _reveal: Option<(IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>)>,
    _snap_timer: Rc<RefCell<Option<Timeout>>>,
}

#[wasm_bindgen]
impl EffectsApp {
    pub fn mount() -> Result<EffectsApp, JsValue> {
        console::install();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let reduced_motion = matches_media(&window, "(prefers-reduced-motion: reduce)");
        debug!(reduced_motion, "mounting page effects");

        let header = document.query_selector(HEADER_SELECTOR).ok().flatten();
        let mut listeners = Vec::new();

        Self::inject_styles(&document);

        // Anchor links scroll below the sticky header.
        let nav_toggle: Option<HtmlInputElement> = by_id(&document, NAV_TOGGLE_ID);
        for anchor in query_all(&document, ANCHOR_SELECTOR) {
            let window = window.clone();
            let document = document.clone();
            let header = header.clone();
            let nav_toggle = nav_toggle.clone();
            let href = anchor.get_attribute("href").unwrap_or_default();
            listeners.push(EventListener::new_with_options(
                &anchor,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    if href.is_empty() || href == "#" {
                        return;
                    }
                    let Some(target) = document.query_selector(&href).ok().flatten() else {
                        return;
                    };
                    event.prevent_default();
                    let top = smooth_scroll_target(
                        client_rect(&target).top,
                        window.scroll_y().unwrap_or(0.0),
                        header_height(header.as_ref()),
                    );
                    scroll_to(&window, top, !reduced_motion);
                    if let Some(toggle) = &nav_toggle {
                        close_nav(toggle);
                    }
                },
            ));
        }

        // Progress bar + active nav section.
        let nav_links: Vec<Element> = query_all(&document, NAV_LINK_SELECTOR)
            .into_iter()
            .filter(|a| a.get_attribute("href").is_some_and(|h| h.starts_with('#')))
            .collect();
        let mut linked_links = Vec::new();
        let mut sections = Vec::new();
        for link in nav_links {
            let section = link
                .get_attribute("href")
                .and_then(|href| document.query_selector(&href).ok().flatten())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(section) = section {
                linked_links.push(link);
                sections.push(section);
            }
        }
        let tracker = Rc::new(RefCell::new(ScrollTracker {
            window: window.clone(),
            document: document.clone(),
            progress: create_progress_bar(&document),
            header: header.clone(),
            nav_links: linked_links,
            sections,
            throttle: FrameThrottle::default(),
        }));
        let scroll_frame = {
            let tracker = Rc::clone(&tracker);
            Closure::<dyn FnMut()>::new(move || {
                let Ok(mut tracker) = tracker.try_borrow_mut() else {
                    return;
                };
                tracker.throttle.frame_done();
                tracker.update();
            })
        };
        let frame_fn: js_sys::Function = scroll_frame
            .as_ref()
            .unchecked_ref::<js_sys::Function>()
            .clone();
        {
            let tracker = Rc::clone(&tracker);
            let window_for_frame = window.clone();
            listeners.push(EventListener::new(&window, "scroll", move |_| {
                let Ok(mut tracker) = tracker.try_borrow_mut() else {
                    return;
                };
                if tracker.throttle.request() {
                    let _ = window_for_frame.request_animation_frame(&frame_fn);
                }
            }));
        }
        {
            let tracker = Rc::clone(&tracker);
            listeners.push(EventListener::new(&window, "resize", move |_| {
                if let Ok(tracker) = tracker.try_borrow() {
                    tracker.update();
                }
            }));
        }
        tracker.borrow().update();

        let reveal = Self::mount_reveal(&document, reduced_motion);

        let mut glow = None;
        if !reduced_motion {
            listeners.extend(Self::mount_magnetic(&document));
            listeners.extend(Self::mount_tilt(&document));
            if let Some((glow_loop, glow_listeners)) = Self::mount_glow(&window, &document) {
                glow = Some(glow_loop);
                listeners.extend(glow_listeners);
            }
        } else {
            for el in MAGNETIC_SELECTORS
                .iter()
                .flat_map(|selector| html_elements(&document, selector))
            {
                set_style(&el, "transform", "translate3d(0,0,0)");
            }
        }

        let snap_timer = Rc::new(RefCell::new(None));
        let snap_enabled = !reduced_motion
            && matches_media(&window, &format!("(min-width: {SNAP_MIN_VIEWPORT_PX}px)"));
        if snap_enabled {
            listeners.push(Self::mount_snap(&window, &document, header, &snap_timer));
        }

        Ok(Self {
            _listeners: listeners,
            _scroll_frame: scroll_frame,
            _glow: glow,
            _reveal: reveal,
            _snap_timer: snap_timer,
        })
    }
}

impl EffectsApp {
    fn inject_styles(document: &Document) {
        let Some(head) = document.head() else {
            return;
        };
        let Ok(style) = document.create_element("style") else {
            return;
        };
        style.set_text_content(Some(EFFECT_STYLES));
        let _ = head.append_child(&style);
    }

    fn mount_reveal(
        document: &Document,
        reduced_motion: bool,
    ) -> Option<(IntersectionObserver, Closure<dyn FnMut(Array, IntersectionObserver)>)> {
        let targets: Vec<Element> = REVEAL_TARGETS
            .iter()
            .flat_map(|selector| query_all(document, selector))
            .collect();
        for el in &targets {
            let _ = el.class_list().add_1("reveal");
        }
        let show_all = |targets: &[Element]| {
            for el in targets {
                let _ = el.class_list().add_1("show");
            }
        };
        if reduced_motion {
            show_all(&targets);
            return None;
        }

        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        let _ = entry.target().class_list().add_1("show");
                    }
                }
            },
        );
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let Ok(observer) =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
        else {
            debug!("IntersectionObserver unavailable; showing reveal targets");
            show_all(&targets);
            return None;
        };
        for el in &targets {
            observer.observe(el);
        }
        Some((observer, callback))
    }

    fn mount_magnetic(document: &Document) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        for el in MAGNETIC_SELECTORS
            .iter()
            .flat_map(|selector| html_elements(document, selector))
        {
            set_style(&el, "transform", "translate3d(0,0,0)");
            set_style(&el, "will-change", "transform");
            let strength = if el.class_list().contains("primary") {
                MAGNETIC_STRENGTH_PRIMARY
            } else {
                MAGNETIC_STRENGTH_DEFAULT
            };
            {
                let el_move = el.clone();
                listeners.push(EventListener::new(&el, "mousemove", move |event| {
                    let Some(at) = pointer(event) else {
                        return;
                    };
                    let offset = magnetic_offset(at, client_rect(&el_move), strength);
                    set_style(
                        &el_move,
                        "transform",
                        &format!("translate3d({}px, {}px, 0)", offset.x, offset.y),
                    );
                }));
            }
            let el_leave = el.clone();
            listeners.push(EventListener::new(&el, "mouseleave", move |_| {
                set_style(&el_leave, "transform", "translate3d(0,0,0)");
            }));
        }
        listeners
    }

    fn mount_tilt(document: &Document) -> Vec<EventListener> {
        let Some(card) = document
            .query_selector(HERO_CARD_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return Vec::new();
        };
        set_style(&card, "transform-style", "preserve-3d");
        set_style(&card, "will-change", "transform");
        let card_move = card.clone();
        let card_leave = card.clone();
        vec![
            EventListener::new(&card, "mousemove", move |event| {
                if let Some(at) = pointer(event) {
                    let transform = tilt(at, client_rect(&card_move)).css_transform();
                    set_style(&card_move, "transform", &transform);
                }
            }),
            EventListener::new(&card, "mouseleave", move |_| {
                set_style(&card_leave, "transform", "none");
            }),
        ]
    }

    fn mount_glow(window: &Window, document: &Document) -> Option<(GlowLoop, Vec<EventListener>)> {
        let glow = create_glow(document)?;
        let width = window.inner_width().ok()?.as_f64().unwrap_or(0.0);
        let height = window.inner_height().ok()?.as_f64().unwrap_or(0.0);
        let follower = Rc::new(RefCell::new(GlowFollower::centered(width, height)));

        let listeners = {
            let on_move = Rc::clone(&follower);
            let glow_move = glow.clone();
            let on_out = Rc::clone(&follower);
            let glow_out = glow.clone();
            vec![
                EventListener::new(window, "mousemove", move |event| {
                    if let Some(at) = pointer(event) {
                        on_move.borrow_mut().pointer_moved(at);
                        set_style(&glow_move, "opacity", "1");
                    }
                }),
                EventListener::new(window, "mouseout", move |_| {
                    on_out.borrow_mut().pointer_left();
                    set_style(&glow_out, "opacity", "0");
                }),
            ]
        };

        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let frame_id = Rc::new(Cell::new(None));
        let reschedule = Rc::downgrade(&slot);
        let next_id = Rc::clone(&frame_id);
        let frame_window = window.clone();
        *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            let transform = {
                let mut follower = follower.borrow_mut();
                follower.tick();
                follower.css_transform()
            };
            set_style(&glow, "transform", &transform);
            let Some(slot) = reschedule.upgrade() else {
                return;
            };
            if let Some(callback) = slot.borrow().as_ref() {
                next_id.set(
                    frame_window
                        .request_animation_frame(callback.as_ref().unchecked_ref())
                        .ok(),
                );
            }
        }));
        if let Some(callback) = slot.borrow().as_ref() {
            frame_id.set(
                window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .ok(),
            );
        }
        let glow_loop = GlowLoop {
            window: window.clone(),
            slot,
            frame_id,
        };
        Some((glow_loop, listeners))
    }

    fn mount_snap(
        window: &Window,
        document: &Document,
        header: Option<Element>,
        timer: &Rc<RefCell<Option<Timeout>>>,
    ) -> EventListener {
        let sections = html_elements(document, SNAP_SECTION_SELECTOR);
        let timer = Rc::clone(timer);
        let window_for_snap = window.clone();
        EventListener::new(window, "scroll", move |_| {
            let window = window_for_snap.clone();
            let header = header.clone();
            let tops: Vec<f64> = sections.iter().map(|s| f64::from(s.offset_top())).collect();
            // Replacing the pending timeout cancels it.
            *timer.borrow_mut() = Some(Timeout::new(SNAP_DELAY_MS, move || {
                let scroll_y = window.scroll_y().unwrap_or(0.0);
                if let Some(top) = snap_target(scroll_y, header_height(header.as_ref()), &tops) {
                    scroll_to(&window, top, true);
                }
            }));
        })
    }
}
