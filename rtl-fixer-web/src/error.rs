use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("`window` is not available")]
    MissingWindow,
    #[error("document has no <head>")]
    MissingHead,
    #[error("document has no <body>")]
    MissingBody,
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}
