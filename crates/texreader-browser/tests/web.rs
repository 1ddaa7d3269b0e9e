//! WASM browser tests for texreader-browser.
//!
//! Run with: `wasm-pack test --headless --firefox` or `--chrome`

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use texreader_browser::dom;
use texreader_browser::{
    DomError, LatexJsRenderer, QueryParams, ReaderConfig, Rect, RenderOptions, files,
    load_config, location, render_into,
};
use web_sys::HtmlElement;

fn scratch_div(id: &str) -> HtmlElement {
    let div: HtmlElement = dom::create("div").unwrap();
    div.set_id(id);
    dom::document()
        .unwrap()
        .body()
        .unwrap()
        .append_child(&div)
        .unwrap();
    div
}

// === DOM helpers ===

#[wasm_bindgen_test]
fn test_by_id_missing_and_wrong_type() {
    let _div = scratch_div("by-id-test");
    assert!(dom::by_id::<HtmlElement>("by-id-test").is_ok());
    assert!(matches!(
        dom::by_id::<HtmlElement>("does-not-exist"),
        Err(DomError::MissingElement(_))
    ));
    assert!(matches!(
        dom::by_id::<web_sys::HtmlInputElement>("by-id-test"),
        Err(DomError::WrongType { .. })
    ));
}

#[wasm_bindgen_test]
fn test_rect_round_trip_through_style() {
    let div = scratch_div("rect-test");
    dom::set_rect(&div, Rect::new(-20, 35, 400, 300));
    let style = div.style();
    assert_eq!(style.get_property_value("left").unwrap(), "-20px");
    assert_eq!(style.get_property_value("top").unwrap(), "35px");
    assert_eq!(style.get_property_value("width").unwrap(), "400px");
    assert_eq!(style.get_property_value("height").unwrap(), "300px");
}

#[wasm_bindgen_test]
fn test_visibility_and_classes() {
    let div = scratch_div("visibility-test");
    let display = || div.style().get_property_value("display").unwrap();
    dom::set_visible(&div, false);
    assert_eq!(display(), "none");
    dom::set_block(&div, true);
    assert_eq!(display(), "block");

    dom::set_class(&div, "active", true);
    assert!(div.class_list().contains("active"));
    dom::set_class(&div, "active", false);
    assert!(!div.class_list().contains("active"));
}

// === Location ===

#[wasm_bindgen_test]
fn test_set_url_param_keeps_others() {
    location::set_url_param("tab", "a b").unwrap();
    location::set_url_param("tab", "second").unwrap();
    let params = location::url_params();
    assert_eq!(params.get("tab"), Some("second"));
    assert_eq!(params.iter().filter(|(k, _)| *k == "tab").count(), 1);
}

#[wasm_bindgen_test]
fn test_absolute_url() {
    let url = location::absolute_url("docs/a.tex").unwrap();
    assert!(url.starts_with("http"));
    assert!(url.ends_with("/docs/a.tex"));
    assert_eq!(
        location::absolute_url("https://example.com/x.tex").unwrap(),
        "https://example.com/x.tex"
    );
}

// === Files ===

#[wasm_bindgen_test]
fn test_pick_file_listener_is_owned_by_caller() {
    let picked = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = picked.clone();
    let listener = files::pick_file(".tex", move |_| flag.set(true)).unwrap();
    // Replacing an abandoned picker drops its listener without firing it.
    drop(listener);
    assert!(!picked.get());
}

// === Rendering ===

#[wasm_bindgen_test]
fn test_render_without_latexjs_reports_error() {
    // The test page does not load latex.js, so rendering must fail
    // gracefully and leave a message in the target.
    let target = scratch_div("render-test");
    target.set_inner_html("<p>stale</p>");
    let renderer = LatexJsRenderer::new(ReaderConfig::default().renderer_assets);

    let ok = render_into(&renderer, "$x$", &target, &RenderOptions::default());
    assert!(!ok);
    let text = target.text_content().unwrap_or_default();
    assert!(text.starts_with("Render error:"), "got {text:?}");
    assert!(target.query_selector(".render-error").unwrap().is_some());
}

// === Config ===

#[wasm_bindgen_test]
fn test_load_config_from_object() {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"renderDebounceMs".into(), &250.into()).unwrap();
    let config = load_config(Some(obj.into()));
    assert_eq!(config.render_debounce_ms, 250);
    assert_eq!(config.resize_debounce_ms, 100);

    let bad = js_sys::Object::new();
    js_sys::Reflect::set(&bad, &"renderDebounceMs".into(), &"soon".into()).unwrap();
    assert_eq!(load_config(Some(bad.into())), ReaderConfig::default());
}

#[wasm_bindgen_test]
fn test_url_params_read_page_search() {
    location::set_url_param("mode", "quote").unwrap();
    let params = location::url_params();
    assert_eq!(params.get("mode"), Some("quote"));
    let reparsed = QueryParams::parse(&dom::window().unwrap().location().search().unwrap());
    assert_eq!(reparsed.get("mode"), Some("quote"));
}
