//! Small DOM helpers shared by every mode controller.

use texreader_core::geometry::{Bounds, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::DomError;

pub fn window() -> Result<Window, DomError> {
    web_sys::window().ok_or(DomError::NoDocument)
}

pub fn document() -> Result<Document, DomError> {
    window()?.document().ok_or(DomError::NoDocument)
}

fn cast<T: JsCast>(element: Element, selector: &str) -> Result<T, DomError> {
    element.dyn_into::<T>().map_err(|_| DomError::WrongType {
        selector: selector.into(),
        expected: std::any::type_name::<T>(),
    })
}

/// Element by id, cast to `T`.
pub fn by_id<T: JsCast>(id: &str) -> Result<T, DomError> {
    let element = document()?
        .get_element_by_id(id)
        .ok_or_else(|| DomError::MissingElement(id.into()))?;
    cast(element, id)
}

/// First match of `selector` in the document, cast to `T`.
pub fn query<T: JsCast>(selector: &str) -> Result<T, DomError> {
    let element = document()?
        .query_selector(selector)?
        .ok_or_else(|| DomError::MissingElement(selector.into()))?;
    cast(element, selector)
}

/// First match of `selector` below `root`, cast to `T`.
pub fn query_in<T: JsCast>(root: &Element, selector: &str) -> Result<T, DomError> {
    let element = root
        .query_selector(selector)?
        .ok_or_else(|| DomError::MissingElement(selector.into()))?;
    cast(element, selector)
}

/// Every match of `selector` in the document that casts to `T`.
pub fn query_all<T: JsCast>(selector: &str) -> Vec<T> {
    match document().and_then(|d| d.query_selector_all(selector).map_err(DomError::from)) {
        Ok(list) => collect_nodes(&list),
        Err(e) => {
            tracing::warn!("querySelectorAll({selector}) failed: {e}");
            Vec::new()
        }
    }
}

/// Every match of `selector` below `root` that casts to `T`.
pub fn query_all_in<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    match root.query_selector_all(selector) {
        Ok(list) => collect_nodes(&list),
        Err(_) => Vec::new(),
    }
}

fn collect_nodes<T: JsCast>(list: &web_sys::NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn create<T: JsCast>(tag: &str) -> Result<T, DomError> {
    let element = document()?.create_element(tag)?;
    cast(element, tag)
}

/// Show with the stylesheet's own display value, or hide.
pub fn set_visible(element: &HtmlElement, visible: bool) {
    let value = if visible { "" } else { "none" };
    let _ = element.style().set_property("display", value);
}

/// Show as `display: block`, or hide.
pub fn set_block(element: &HtmlElement, visible: bool) {
    let value = if visible { "block" } else { "none" };
    let _ = element.style().set_property("display", value);
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

/// Write a rect as absolute `left/top/width/height` pixels.
pub fn set_rect(element: &HtmlElement, rect: Rect) {
    let style = element.style();
    let _ = style.set_property("left", &format!("{}px", rect.x));
    let _ = style.set_property("top", &format!("{}px", rect.y));
    let _ = style.set_property("width", &format!("{}px", rect.width));
    let _ = style.set_property("height", &format!("{}px", rect.height));
}

pub fn set_z_index(element: &HtmlElement, z: u32) {
    let _ = element.style().set_property("z-index", &z.to_string());
}

pub fn set_font_size(element: &HtmlElement, px: f32) {
    let _ = element.style().set_property("font-size", &format!("{px}px"));
}

/// Rendered size of `element`, used as the clamp area for windows.
pub fn bounds_of(element: &Element) -> Bounds {
    let rect = element.get_bounding_client_rect();
    Bounds::new(rect.width() as i32, rect.height() as i32)
}
