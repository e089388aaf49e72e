use folio_core::site::REVEAL_THRESHOLD;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom;
use crate::error::InitError;

pub(crate) const REVEAL_SELECTOR: &str = "[data-reveal]";
pub(crate) const REVEALED_CLASS: &str = "is-revealed";

fn mark_revealed(element: &Element) {
    let _ = element.class_list().add_1(REVEALED_CLASS);
}

pub(crate) fn install(reduced_motion: bool) -> Result<(), InitError> {
    let elements = dom::query_all(REVEAL_SELECTOR);
    if reduced_motion || !dom::window_supports("IntersectionObserver") {
        elements.iter().for_each(mark_revealed);
        return Ok(());
    }
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                mark_revealed(&target);
                observer.unobserve(&target);
            }
        },
    );
    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }
    callback.forget();
    Ok(())
}
