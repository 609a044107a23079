//! Contact page wiring: loading state on submit and the copy-email toast.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::contact::{ContactForm, CopyOutcome, LOADING_CLASS, SENDING_LABEL, Toast};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::Reflect;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

use crate::console;
use crate::dom::by_id;
use crate::wasm::document;

const FORM_ID: &str = "contactFormEl";
const SUBMIT_ID: &str = "submitBtn";
const HONEYPOT_SELECTOR: &str = r#"input[name="company"]"#;
const TOAST_ID: &str = "toast";
const TOAST_TEXT_ID: &str = "toastText";
const EMAIL_TEXT_ID: &str = "emailText";
const COPY_BUTTON_ID: &str = "copyEmailBtn";
const SPINNER_HTML: &str = r#"<i class="fa-solid fa-spinner"></i>"#;

struct ToastView {
    toast: Toast,
    container: HtmlElement,
    text: Element,
    hide_timer: Option<Timeout>,
}

impl ToastView {
    fn show(view: &Rc<RefCell<Self>>, message: &str) {
        let mut this = view.borrow_mut();
        let now = js_sys::Date::now();
        this.toast.show(message, now);
        this.text.set_text_content(this.toast.message());
        this.container.set_hidden(false);

        let delay = this.toast.remaining_ms(now).ceil() as u32;
        let weak = Rc::downgrade(view);
        // Replacing the handle cancels any pending hide.
        this.hide_timer = Some(Timeout::new(delay, move || {
            let Some(view) = weak.upgrade() else {
                return;
            };
            let Ok(this) = view.try_borrow() else {
                return;
            };
            this.container.set_hidden(true);
        }));
    }
}

async fn copy_to_clipboard(text: String) -> CopyOutcome {
    let Some(window) = web_sys::window() else {
        return CopyOutcome::Unsupported;
    };
    let navigator = window.navigator();
    // Absent outside secure contexts.
    let clipboard = match Reflect::get(&navigator, &"clipboard".into()) {
        Ok(value) if !value.is_undefined() && !value.is_null() => {
            value.unchecked_into::<web_sys::Clipboard>()
        }
        _ => return CopyOutcome::Unsupported,
    };
    match JsFuture::from(clipboard.write_text(&text)).await {
        Ok(_) => CopyOutcome::Copied,
        Err(_) => CopyOutcome::Unsupported,
    }
}

/// Contact page helper. Never blocks native form submission.
///
/// Listeners are removed when the handle is dropped, so keep it referenced.
#[wasm_bindgen]
pub struct ContactApp {
    _listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl ContactApp {
    pub fn mount() -> Result<ContactApp, JsValue> {
        console::install();
        let document = document()?;
        let form_state = Rc::new(RefCell::new(ContactForm::default()));
        let mut listeners = Vec::new();

        let toast = match (
            by_id::<HtmlElement>(&document, TOAST_ID),
            document.get_element_by_id(TOAST_TEXT_ID),
        ) {
            (Some(container), Some(text)) => Some(Rc::new(RefCell::new(ToastView {
                toast: Toast::default(),
                container,
                text,
                hide_timer: None,
            }))),
            _ => None,
        };

        if let (Some(button), Some(email)) = (
            document.get_element_by_id(COPY_BUTTON_ID),
            document.get_element_by_id(EMAIL_TEXT_ID),
        ) {
            listeners.push(EventListener::new(&button, "click", move |_| {
                let text = email
                    .text_content()
                    .map(|t| t.trim().to_owned())
                    .unwrap_or_default();
                let toast = toast.clone();
                spawn_local(async move {
                    let outcome = copy_to_clipboard(text).await;
                    debug!(?outcome, "copy email");
                    if let Some(view) = &toast {
                        ToastView::show(view, outcome.message());
                    }
                });
            }));
        }

        if let (Some(form), Some(submit)) = (
            by_id::<HtmlFormElement>(&document, FORM_ID),
            by_id::<HtmlButtonElement>(&document, SUBMIT_ID),
        ) {
            let state = form_state;
            let form_el = form.clone();
            listeners.push(EventListener::new(&form, "submit", move |_| {
                let honeypot = form_el
                    .query_selector(HONEYPOT_SELECTOR)
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                let Ok(mut state) = state.try_borrow_mut() else {
                    return;
                };
                if state.on_submit(&honeypot) {
                    submit.set_disabled(true);
                    let _ = submit.class_list().add_1(LOADING_CLASS);
                    submit.set_inner_html(&format!("{SENDING_LABEL} {SPINNER_HTML}"));
                }
            }));
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}
