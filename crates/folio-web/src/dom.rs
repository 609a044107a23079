//! DOM-backed surfaces for the gallery and lightbox projections.

use folio_core::{ClassNames, GallerySurface, ItemRecord, LightboxSurface, Selectors, TagFilter};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, NodeList};

pub(crate) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.get(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub(crate) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(|list| elements(&list))
        .unwrap_or_default()
}

pub(crate) fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Read the card's tags and its first image into a catalog record.
pub(crate) fn card_record(card: &Element, tags_attribute: &str) -> ItemRecord {
    let tags = card.get_attribute(tags_attribute).unwrap_or_default();
    let image = card
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok());
    match image {
        Some(img) => ItemRecord::new(tags, img.src(), img.alt()),
        None => ItemRecord::new(tags, "", ""),
    }
}

fn toggle_class(el: &Element, class: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(class, force);
}

pub(crate) struct FilterControl {
    pub element: Element,
    /// Raw attribute value, dispatched as-is on activation.
    pub raw: String,
    /// Normalized label compared against the active filter.
    pub label: String,
}

pub(crate) struct DomGallerySurface {
    cards: Vec<Element>,
    controls: Vec<FilterControl>,
    load_more: Option<HtmlElement>,
    load_hint: Option<Element>,
    empty_state: Option<HtmlElement>,
    classes: ClassNames,
}

impl DomGallerySurface {
    pub(crate) fn new(
        document: &Document,
        cards: Vec<Element>,
        selectors: &Selectors,
        classes: &ClassNames,
    ) -> Self {
        let controls = query_all(document, &selectors.filter_control)
            .into_iter()
            .map(|element| {
                let raw = element
                    .get_attribute(&selectors.filter_attribute)
                    .unwrap_or_default();
                let label = TagFilter::parse(&raw).label().to_owned();
                FilterControl {
                    element,
                    raw,
                    label,
                }
            })
            .collect();
        let surface = Self {
            cards,
            controls,
            load_more: by_id(document, &selectors.load_more_id),
            load_hint: document.get_element_by_id(&selectors.load_hint_id),
            empty_state: by_id(document, &selectors.empty_state_id),
            classes: classes.clone(),
        };
        if surface.load_more.is_none() || surface.load_hint.is_none() {
            debug!("load-more control or hint missing; pagination affordance disabled");
        }
        if surface.empty_state.is_none() {
            debug!("empty-state element missing");
        }
        surface
    }

    pub(crate) fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub(crate) fn load_more(&self) -> Option<&HtmlElement> {
        self.load_more.as_ref()
    }
}

impl GallerySurface for DomGallerySurface {
    fn set_item_hidden(&mut self, index: usize, hidden: bool) {
        if let Some(card) = self.cards.get(index) {
            toggle_class(card, &self.classes.hidden, hidden);
        }
    }

    fn set_active_filter(&mut self, label: &str) {
        for control in &self.controls {
            toggle_class(&control.element, &self.classes.active, control.label == label);
        }
    }

    fn set_load_more(&mut self, visible: bool, hint: &str) {
        let (Some(button), Some(hint_el)) = (&self.load_more, &self.load_hint) else {
            return;
        };
        let display = if visible { "inline-flex" } else { "none" };
        let _ = button.style().set_property("display", display);
        hint_el.set_text_content(Some(hint));
    }

    fn set_empty_state(&mut self, visible: bool) {
        if let Some(empty) = &self.empty_state {
            empty.set_hidden(!visible);
        }
    }
}

pub(crate) struct DomLightboxSurface {
    container: Option<Element>,
    image: Option<HtmlImageElement>,
    body: Option<HtmlElement>,
    open_class: String,
}

impl DomLightboxSurface {
    pub(crate) fn new(document: &Document, selectors: &Selectors, classes: &ClassNames) -> Self {
        let surface = Self {
            container: document.get_element_by_id(&selectors.lightbox_id),
            image: by_id(document, &selectors.lightbox_image_id),
            body: document.body(),
            open_class: classes.open.clone(),
        };
        if surface.container.is_none() || surface.image.is_none() {
            debug!("lightbox markup missing; zoom disabled");
        }
        surface
    }

    pub(crate) fn container(&self) -> Option<&Element> {
        self.container.as_ref()
    }

    fn parts(&self) -> Option<(&Element, &HtmlImageElement)> {
        Some((self.container.as_ref()?, self.image.as_ref()?))
    }
}

impl LightboxSurface for DomLightboxSurface {
    fn show_image(&mut self, src: &str, alt: &str) {
        let Some((container, image)) = self.parts() else {
            return;
        };
        image.set_src(src);
        image.set_alt(alt);
        toggle_class(container, &self.open_class, true);
        let _ = container.set_attribute("aria-hidden", "false");
    }

    fn hide(&mut self) {
        let Some((container, image)) = self.parts() else {
            return;
        };
        toggle_class(container, &self.open_class, false);
        let _ = container.set_attribute("aria-hidden", "true");
        let _ = image.remove_attribute("src");
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        if self.parts().is_none() {
            return;
        }
        let Some(body) = &self.body else {
            return;
        };
        let style = body.style();
        if locked {
            let _ = style.set_property("overflow", "hidden");
        } else {
            let _ = style.remove_property("overflow");
        }
    }
}
