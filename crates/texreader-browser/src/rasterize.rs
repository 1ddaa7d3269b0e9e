//! html2canvas bindings for exporting rendered output as PNG.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::error::DomError;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = html2canvas, catch)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterOptions {
    pub background_color: String,
    pub scale: f64,
}

/// Rasterize `element` and return a `data:image/png` URL.
pub async fn element_to_png(element: &HtmlElement, options: &RasterOptions) -> Result<String, DomError> {
    let options = serde_wasm_bindgen::to_value(options).map_err(|e| DomError::Js(e.to_string()))?;
    let canvas = JsFuture::from(html2canvas(element, &options)?).await?;
    let canvas: HtmlCanvasElement = canvas
        .dyn_into()
        .map_err(|_| DomError::Js("html2canvas did not return a canvas".into()))?;
    Ok(canvas.to_data_url()?)
}
