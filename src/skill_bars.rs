use folio_core::site::skill_width;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::dom;
use crate::error::InitError;

pub(crate) const BAR_SELECTOR: &str = ".bar span";
const WIDTH_PROPERTY: &str = "--w";

pub(crate) fn fill_bars() -> usize {
    let mut filled = 0;
    for element in dom::query_all(BAR_SELECTOR) {
        let declared = dom::computed_property(&element, WIDTH_PROPERTY);
        let Ok(bar) = element.dyn_into::<HtmlElement>() else {
            continue;
        };
        if bar.style().set_property("width", skill_width(&declared)).is_ok() {
            filled += 1;
        }
    }
    filled
}

pub(crate) fn install(delay_ms: u32) -> Result<(), InitError> {
    Timeout::new(delay_ms, || {
        fill_bars();
    })
    .forget();
    Ok(())
}
