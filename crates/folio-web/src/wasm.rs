//! `wasm-bindgen` exports for the project gallery and the mobile nav.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{Catalog, FolioConfig, Gallery, GalleryEvent};
use gloo::events::EventListener;
use js_sys::{Object, Reflect};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlImageElement, HtmlInputElement, KeyboardEvent};

use crate::console;
use crate::dom::{self, DomGallerySurface, DomLightboxSurface};

pub(crate) fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

pub(crate) fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Element an event was dispatched to, if it is an element.
pub(crate) fn event_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

struct Mounted {
    gallery: Gallery,
    grid: DomGallerySurface,
    lightbox: DomLightboxSurface,
}

type Shared = Rc<RefCell<Mounted>>;

fn dispatch(state: &Shared, event: GalleryEvent) {
    let Ok(mut mounted) = state.try_borrow_mut() else {
        warn!("gallery event dropped: state already borrowed");
        return;
    };
    let Mounted {
        gallery,
        grid,
        lightbox,
    } = &mut *mounted;
    let redraw = gallery.dispatch(event);
    gallery.render(redraw, grid, lightbox);
}

/// Project gallery mounted on the page: filters, "load more" and lightbox.
///
/// The returned handle owns every listener. Keep it referenced from JS for
/// as long as the page is live: once it is `free()`d, or collected after the
/// last reference goes away, the listeners are removed and the gallery stops
/// responding.
#[wasm_bindgen]
pub struct GalleryApp {
    state: Shared,
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl GalleryApp {
    /// Mount on the current document.
    ///
    /// `config_json` is an optional [`FolioConfig`] JSON object. Returns
    /// `undefined` when the page has no gallery grid.
    pub fn mount(config_json: Option<String>) -> Result<Option<GalleryApp>, JsValue> {
        console::install();
        let config = match config_json.as_deref() {
            Some(json) => FolioConfig::from_json(json),
            None => Ok(FolioConfig::default()),
        }
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let document = document()?;
        let Some(grid_el) = document.get_element_by_id(&config.selectors.grid_id) else {
            debug!(grid_id = %config.selectors.grid_id, "no gallery grid on page");
            return Ok(None);
        };

        let cards = dom::query_all_in(&grid_el, &config.selectors.card);
        let catalog = Catalog::from_records(
            cards
                .iter()
                .map(|card| dom::card_record(card, &config.selectors.tags_attribute)),
        );
        let gallery =
            Gallery::new(catalog, &config).map_err(|err| JsValue::from_str(&err.to_string()))?;
        let grid = DomGallerySurface::new(&document, cards, &config.selectors, &config.classes);
        let lightbox = DomLightboxSurface::new(&document, &config.selectors, &config.classes);

        let mounted = Mounted {
            gallery,
            grid,
            lightbox,
        };
        let state: Shared = Rc::new(RefCell::new(mounted));
        let listeners = Self::subscribe(&state, &document, &grid_el, &config);

        {
            let mut mounted = state.borrow_mut();
            let Mounted {
                gallery,
                grid,
                lightbox,
            } = &mut *mounted;
            gallery.render_all(grid, lightbox);
            info!(
                items = gallery.pager().catalog().len(),
                tags = gallery.pager().catalog().known_tags().len(),
                "gallery mounted"
            );
        }

        Ok(Some(Self {
            state,
            _listeners: listeners,
        }))
    }

    /// Snapshot of gallery state for debugging and host integration tests.
    pub fn state(&self) -> JsValue {
        let obj = Object::new();
        let Ok(mounted) = self.state.try_borrow() else {
            return obj.into();
        };
        let pager = mounted.gallery.pager();
        let affordances = pager.affordances();
        set_js(
            &obj,
            "activeFilter",
            JsValue::from_str(pager.active_filter().label()),
        );
        set_js(
            &obj,
            "revealed",
            JsValue::from_f64(pager.revealed_count() as f64),
        );
        set_js(
            &obj,
            "matching",
            JsValue::from_f64(pager.matching_count() as f64),
        );
        set_js(
            &obj,
            "loadMoreVisible",
            JsValue::from_bool(affordances.load_more_visible),
        );
        set_js(&obj, "hint", JsValue::from_str(&affordances.hint.to_string()));
        set_js(
            &obj,
            "emptyVisible",
            JsValue::from_bool(affordances.empty_visible),
        );
        set_js(
            &obj,
            "lightboxOpen",
            JsValue::from_bool(mounted.gallery.lightbox().is_open()),
        );
        obj.into()
    }

    /// Apply a filter as if its control had been clicked.
    #[wasm_bindgen(js_name = setFilter)]
    pub fn set_filter(&self, value: &str) {
        dispatch(&self.state, GalleryEvent::FilterSelected(value.to_owned()));
    }

    #[wasm_bindgen(js_name = loadMore)]
    pub fn load_more(&self) {
        dispatch(&self.state, GalleryEvent::LoadMore);
    }

    #[wasm_bindgen(js_name = closeLightbox)]
    pub fn close_lightbox(&self) {
        dispatch(&self.state, GalleryEvent::CloseActivated);
    }
}

impl GalleryApp {
    fn subscribe(
        state: &Shared,
        document: &Document,
        grid_el: &Element,
        config: &FolioConfig,
    ) -> Vec<EventListener> {
        let mut listeners = Vec::new();
        let mounted = state.borrow();

        for control in mounted.grid.controls() {
            let state = Rc::clone(state);
            let raw = control.raw.clone();
            listeners.push(EventListener::new(&control.element, "click", move |_| {
                dispatch(&state, GalleryEvent::FilterSelected(raw.clone()));
            }));
        }

        if let Some(button) = mounted.grid.load_more() {
            let state = Rc::clone(state);
            listeners.push(EventListener::new(button, "click", move |_| {
                dispatch(&state, GalleryEvent::LoadMore);
            }));
        }

        {
            let state = Rc::clone(state);
            let zoomable = config.selectors.zoomable_image.clone();
            listeners.push(EventListener::new(grid_el, "click", move |event| {
                let Some(img) = event_element(event)
                    .and_then(|el| el.closest(&zoomable).ok().flatten())
                    .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
                else {
                    return;
                };
                dispatch(
                    &state,
                    GalleryEvent::ImageActivated {
                        src: img.src(),
                        alt: img.alt(),
                    },
                );
            }));
        }

        if let Some(container) = mounted.lightbox.container() {
            let state = Rc::clone(state);
            let close_target = config.selectors.close_target.clone();
            listeners.push(EventListener::new(container, "click", move |event| {
                let should_close = event_element(event)
                    .and_then(|el| el.closest(&close_target).ok().flatten())
                    .is_some();
                if should_close {
                    dispatch(&state, GalleryEvent::CloseActivated);
                }
            }));
        }

        {
            let state = Rc::clone(state);
            listeners.push(EventListener::new(document, "keydown", move |event| {
                if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
                    dispatch(&state, GalleryEvent::KeyPressed(key_event.key()));
                }
            }));
        }

        listeners
    }
}

pub(crate) const NAV_TOGGLE_ID: &str = "nav-toggle";
const NAV_LINK_SELECTOR: &str = ".navbar a";

/// Closes the mobile nav after any nav link is followed.
///
/// Like [`GalleryApp`], the listeners live only as long as the handle.
#[wasm_bindgen]
pub struct NavApp {
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl NavApp {
    pub fn mount() -> Result<NavApp, JsValue> {
        console::install();
        let document = document()?;
        let toggle: Option<HtmlInputElement> = dom::by_id(&document, NAV_TOGGLE_ID);
        let Some(toggle) = toggle else {
            debug!("no mobile nav toggle on page");
            return Ok(Self {
                _listeners: Vec::new(),
            });
        };
        let listeners = dom::query_all(&document, NAV_LINK_SELECTOR)
            .iter()
            .map(|link| {
                let toggle = toggle.clone();
                EventListener::new(link, "click", move |_| close_nav(&toggle))
            })
            .collect();
        Ok(Self {
            _listeners: listeners,
        })
    }
}

pub(crate) fn close_nav(toggle: &HtmlInputElement) {
    if toggle.checked() {
        toggle.set_checked(false);
    }
}
