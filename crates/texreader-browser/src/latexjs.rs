//! latex.js bindings and the browser [`LatexRenderer`].
//!
//! Expects the latex.js bundle to be loaded as the `latexjs` global.

use texreader_core::render::{Align, LatexRenderer, RenderOptions};
use wasm_bindgen::prelude::*;
use web_sys::{DocumentFragment, HtmlElement};

use crate::dom;
use crate::error::DomError;

#[wasm_bindgen]
extern "C" {
    /// latex.js HTML generator; collects the output of one parse.
    #[wasm_bindgen(js_namespace = latexjs)]
    pub type HtmlGenerator;

    #[wasm_bindgen(constructor, js_namespace = latexjs, catch)]
    fn new(options: &JsValue) -> Result<HtmlGenerator, JsValue>;

    #[wasm_bindgen(method, catch, js_name = stylesAndScripts)]
    fn styles_and_scripts(this: &HtmlGenerator, base_url: &str) -> Result<DocumentFragment, JsValue>;

    #[wasm_bindgen(method, catch, js_name = domFragment)]
    fn dom_fragment(this: &HtmlGenerator) -> Result<DocumentFragment, JsValue>;

    /// Parses into the generator passed in `options.generator` and returns it.
    #[wasm_bindgen(js_namespace = latexjs, js_name = parse, catch)]
    fn parse(text: &str, options: &JsValue) -> Result<HtmlGenerator, JsValue>;
}

/// Marks `<head>` once latex.js styles have been injected.
const STYLES_MARKER: &str = "data-latexjs-styles";

/// Renders through latex.js into an element.
#[derive(Debug, Clone)]
pub struct LatexJsRenderer {
    assets_base: String,
}

impl LatexJsRenderer {
    /// `assets_base` is where latex.js fetches its CSS and fonts from.
    pub fn new(assets_base: impl Into<String>) -> Self {
        Self {
            assets_base: assets_base.into(),
        }
    }

    fn ensure_styles(&self, generator: &HtmlGenerator) -> Result<(), DomError> {
        let head = dom::document()?.head().ok_or(DomError::NoDocument)?;
        if head.has_attribute(STYLES_MARKER) {
            return Ok(());
        }
        let styles = generator.styles_and_scripts(&self.assets_base)?;
        head.append_child(&styles)?;
        head.set_attribute(STYLES_MARKER, "")?;
        tracing::debug!("injected latex.js styles from {}", self.assets_base);
        Ok(())
    }
}

fn generator_options() -> Result<JsValue, JsValue> {
    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &"hyphenate".into(), &JsValue::FALSE)?;
    Ok(options.into())
}

fn apply_options(target: &HtmlElement, options: &RenderOptions) {
    if let Some(px) = options.font_size_px {
        dom::set_font_size(target, px);
    }
    if let Some(align) = options.align {
        let list = target.class_list();
        for other in [Align::Left, Align::Center, Align::Right] {
            let _ = list.remove_1(other.css_class());
        }
        let _ = list.add_1(align.css_class());
    }
}

impl LatexRenderer for LatexJsRenderer {
    type Target = HtmlElement;
    type Error = DomError;

    fn render(
        &self,
        source: &str,
        target: &HtmlElement,
        options: &RenderOptions,
    ) -> Result<(), DomError> {
        target.set_inner_html("");

        let generator = HtmlGenerator::new(&generator_options()?)?;
        let parse_options = js_sys::Object::new();
        js_sys::Reflect::set(&parse_options, &"generator".into(), &generator)?;
        let generator = parse(source, &parse_options)?;

        self.ensure_styles(&generator)?;
        let fragment = generator.dom_fragment()?;
        target.append_child(&fragment)?;
        apply_options(target, options);
        Ok(())
    }

    fn show_error(&self, target: &HtmlElement, message: &str) {
        target.set_inner_html("");
        let Ok(div) = dom::create::<HtmlElement>("div") else {
            target.set_text_content(Some(message));
            return;
        };
        div.set_class_name("layui-text render-error");
        let _ = div.style().set_property("color", "red");
        div.set_text_content(Some(message));
        let _ = target.append_child(&div);
    }
}
