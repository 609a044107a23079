#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use folio_web::GalleryApp;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("test runs in a browser")
}

const PILLS: &str = r#"<button class="pill" data-filter="all">All</button>
    <button class="pill" data-filter="web">Web</button>
    <button class="pill" data-filter="audio">Audio</button>"#;

const PAGE_CHROME: &str = r#"<button id="loadMoreBtn">Load more</button><p id="loadHint"></p>
    <div id="emptyState" hidden></div>
    <div id="lightbox" aria-hidden="true"><div data-close="true" id="backdrop"></div><img id="lightboxImg"></div>"#;

fn grid_markup(cards: &[&str]) -> String {
    let mut html = String::from(r#"<div id="projectGrid">"#);
    for (idx, tags) in cards.iter().enumerate() {
        html.push_str(&format!(
            r#"<article class="p-card" data-tags="{tags}"><img class="zoomable" src="/img/{idx}.png" alt="card {idx}"></article>"#
        ));
    }
    html.push_str("</div>");
    html
}

fn install_markup(cards: &[&str]) {
    let html = format!("{PILLS}{}{PAGE_CHROME}", grid_markup(cards));
    document().body().expect("body").set_inner_html(&html);
}

/// Pills and cards only: no load-more, hint, empty state or lightbox.
fn install_bare_markup(cards: &[&str]) {
    let html = format!("{PILLS}{}", grid_markup(cards));
    document().body().expect("body").set_inner_html(&html);
}

fn html_element(selector: &str) -> HtmlElement {
    document()
        .query_selector(selector)
        .expect("valid selector")
        .expect("element present")
        .dyn_into()
        .expect("html element")
}

fn active_pills() -> Vec<String> {
    let list = document()
        .query_selector_all(".pill.is-active")
        .expect("valid selector");
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .filter_map(|el| el.get_attribute("data-filter"))
        .collect()
}

fn body_overflow() -> String {
    document()
        .body()
        .expect("body")
        .style()
        .get_property_value("overflow")
        .expect("readable style")
}

fn press_key(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
        .expect("keyboard event");
    document().dispatch_event(&event).expect("dispatch");
}

fn field(state: &JsValue, key: &str) -> JsValue {
    Reflect::get(state, &JsValue::from_str(key)).expect("state field")
}

fn hidden_cards() -> usize {
    let list = document()
        .query_selector_all(".p-card.is-hidden")
        .expect("valid selector");
    list.length() as usize
}

#[wasm_bindgen_test]
fn mount_without_grid_returns_none() {
    document().body().expect("body").set_inner_html("");
    let app = GalleryApp::mount(None).expect("mount succeeds");
    assert!(app.is_none());
}

#[wasm_bindgen_test]
fn first_page_then_load_more() {
    install_markup(&["web", "print", "web", "print", "print", "print", "web", "print"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");

    let state = app.state();
    assert_eq!(field(&state, "revealed").as_f64(), Some(6.0));
    assert_eq!(
        field(&state, "hint").as_string().as_deref(),
        Some("2 more projects available")
    );
    assert_eq!(hidden_cards(), 2);

    app.load_more();
    assert_eq!(hidden_cards(), 0);
    let hint = document()
        .get_element_by_id("loadHint")
        .and_then(|el| el.text_content());
    assert_eq!(hint.as_deref(), Some("You've reached the end."));
}

#[wasm_bindgen_test]
fn filter_without_matches_shows_empty_state() {
    install_markup(&["web", "print", "web"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");

    app.set_filter("audio");
    assert_eq!(hidden_cards(), 3);
    let empty: HtmlElement = document()
        .get_element_by_id("emptyState")
        .expect("empty state")
        .dyn_into()
        .expect("html element");
    assert!(!empty.hidden());
    let active = document()
        .query_selector(".pill.is-active")
        .expect("valid selector")
        .and_then(|el| el.get_attribute("data-filter"));
    assert_eq!(active.as_deref(), Some("audio"));
}

#[wasm_bindgen_test]
fn zoomable_click_opens_and_backdrop_closes() {
    install_markup(&["web", "print"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");

    let img: HtmlElement = document()
        .query_selector("#projectGrid img.zoomable")
        .expect("valid selector")
        .expect("image present")
        .dyn_into()
        .expect("html element");
    img.click();
    assert_eq!(field(&app.state(), "lightboxOpen").as_bool(), Some(true));
    let lightbox = document().get_element_by_id("lightbox").expect("lightbox");
    assert!(lightbox.class_list().contains("is-open"));

    let backdrop: HtmlElement = document()
        .get_element_by_id("backdrop")
        .expect("backdrop")
        .dyn_into()
        .expect("html element");
    backdrop.click();
    assert_eq!(field(&app.state(), "lightboxOpen").as_bool(), Some(false));
    assert!(!lightbox.class_list().contains("is-open"));
}

#[wasm_bindgen_test]
fn invalid_config_is_reported() {
    install_markup(&["web"]);
    assert!(GalleryApp::mount(Some(r#"{"page_size":0}"#.to_owned())).is_err());
}

#[wasm_bindgen_test]
fn missing_optional_elements_are_skipped() {
    install_bare_markup(&["web", "print", "web"]);
    let app = GalleryApp::mount(Some(r#"{"page_size":1}"#.to_owned()))
        .expect("mount succeeds")
        .expect("grid present");
    assert_eq!(hidden_cards(), 2);

    app.load_more();
    assert_eq!(hidden_cards(), 1);

    app.set_filter("web");
    assert_eq!(hidden_cards(), 2);
    app.load_more();
    assert_eq!(hidden_cards(), 1);
    assert_eq!(
        field(&app.state(), "hint").as_string().as_deref(),
        Some("You've reached the end.")
    );

    app.set_filter("audio");
    assert_eq!(hidden_cards(), 3);
    assert_eq!(field(&app.state(), "emptyVisible").as_bool(), Some(true));

    html_element("#projectGrid img.zoomable").click();
    assert_eq!(field(&app.state(), "lightboxOpen").as_bool(), Some(true));
    assert_eq!(body_overflow(), "");
    app.close_lightbox();
    assert_eq!(field(&app.state(), "lightboxOpen").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn exactly_one_pill_is_active() {
    install_markup(&["web", "print", "audio"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");
    assert_eq!(active_pills(), vec!["all".to_owned()]);

    for filter in ["web", "audio", "all"] {
        html_element(&format!(r#".pill[data-filter="{filter}"]"#)).click();
        assert_eq!(active_pills(), vec![filter.to_owned()]);
        assert_eq!(
            field(&app.state(), "activeFilter").as_string().as_deref(),
            Some(filter)
        );
    }
}

#[wasm_bindgen_test]
fn cancel_key_closes_lightbox_and_restores_scroll() {
    install_markup(&["web", "print"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");

    html_element("#projectGrid img.zoomable").click();
    let lightbox = document().get_element_by_id("lightbox").expect("lightbox");
    assert!(lightbox.class_list().contains("is-open"));
    assert_eq!(body_overflow(), "hidden");

    press_key("Enter");
    assert!(lightbox.class_list().contains("is-open"));

    press_key("Escape");
    assert!(!lightbox.class_list().contains("is-open"));
    assert_eq!(body_overflow(), "");
    assert_eq!(field(&app.state(), "lightboxOpen").as_bool(), Some(false));
}

#[wasm_bindgen_test]
fn dropping_the_handle_detaches_listeners() {
    install_markup(&["web", "print"]);
    let app = GalleryApp::mount(None)
        .expect("mount succeeds")
        .expect("grid present");
    html_element(r#".pill[data-filter="audio"]"#).click();
    assert_eq!(hidden_cards(), 2);

    drop(app);
    html_element(r#".pill[data-filter="all"]"#).click();
    assert_eq!(hidden_cards(), 2);
    assert_eq!(active_pills(), vec!["audio".to_owned()]);
}
