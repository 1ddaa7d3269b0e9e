//! Errors raised by the DOM layer.

use smol_str::SmolStr;
use wasm_bindgen::{JsCast, JsValue};

#[derive(thiserror::Error, Debug)]
pub enum DomError {
    #[error("no global window or document")]
    NoDocument,

    #[error("missing element `{0}`")]
    MissingElement(SmolStr),

    #[error("element `{selector}` is not a {expected}")]
    WrongType {
        selector: SmolStr,
        expected: &'static str,
    },

    /// A JS call threw; holds the exception's message.
    #[error("{0}")]
    Js(String),

    #[error(transparent)]
    Fetch(#[from] reqwest::Error),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        DomError::Js(describe_js(&value))
    }
}

impl From<DomError> for JsValue {
    fn from(err: DomError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// Best-effort human text for a thrown JS value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    format!("{value:?}")
}
