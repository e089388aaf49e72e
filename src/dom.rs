use std::cell::RefCell;

use gloo::events::EventListener;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

pub(crate) const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
pub(crate) const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

thread_local! {
    static PAGE_LISTENERS: RefCell<Vec<EventListener>> = RefCell::new(Vec::new());
}

pub(crate) fn window() -> Option<Window> {
    web_sys::window()
}

pub(crate) fn document() -> Option<Document> {
    window().and_then(|window| window.document())
}

pub(crate) fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub(crate) fn html_by_id(id: &str) -> Option<HtmlElement> {
    by_id(id).and_then(|element| element.dyn_into::<HtmlElement>().ok())
}

pub(crate) fn query_all(selector: &str) -> Vec<Element> {
    let Some(document) = document() else {
        return Vec::new();
    };
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn media_matches(query: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    match window.match_media(query) {
        Ok(Some(list)) => list.matches(),
        _ => false,
    }
}

pub(crate) fn prefers_reduced_motion() -> bool {
    media_matches(REDUCED_MOTION_QUERY)
}

pub(crate) fn prefers_dark_mode() -> bool {
    media_matches(DARK_SCHEME_QUERY)
}

pub(crate) fn window_supports(name: &str) -> bool {
    let Some(window) = window() else {
        return false;
    };
    Reflect::has(&window, &JsValue::from_str(name)).unwrap_or(false)
}

pub(crate) fn computed_property(element: &Element, name: &str) -> String {
    let Some(window) = window() else {
        return String::new();
    };
    let Ok(Some(style)) = window.get_computed_style(element) else {
        return String::new();
    };
    style.get_property_value(name).unwrap_or_default()
}

pub(crate) fn retain_listener(listener: EventListener) {
    PAGE_LISTENERS.with(|listeners| listeners.borrow_mut().push(listener));
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| String::from(err.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
