use wasm_bindgen::JsValue;

use crate::dom;

#[derive(Debug, thiserror::Error)]
pub(crate) enum InitError {
    #[error("missing element {0}")]
    MissingElement(&'static str),
    #[error("unsupported platform feature: {0}")]
    Unsupported(&'static str),
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for InitError {
    fn from(value: JsValue) -> Self {
        InitError::Js(dom::js_message(&value))
    }
}
