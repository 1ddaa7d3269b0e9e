//! Copying share links to the clipboard.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

use crate::dom;
use crate::error::DomError;

/// Copy `text` with the async Clipboard API, falling back to
/// `execCommand("copy")` on a hidden textarea.
pub async fn copy_text(text: &str) -> Result<(), DomError> {
    let clipboard = dom::window()?.navigator().clipboard();
    match JsFuture::from(clipboard.write_text(text)).await {
        Ok(_) => Ok(()),
        Err(e) => {
            tracing::debug!(
                "async clipboard write failed, using fallback: {}",
                crate::error::describe_js(&e)
            );
            copy_with_exec_command(text)
        }
    }
}

fn copy_with_exec_command(text: &str) -> Result<(), DomError> {
    let document = dom::document()?;
    let body = document.body().ok_or(DomError::NoDocument)?;

    let textarea: HtmlTextAreaElement = dom::create("textarea")?;
    textarea.set_value(text);
    body.append_child(&textarea)?;
    textarea.select();

    let copied = document
        .dyn_ref::<HtmlDocument>()
        .ok_or(DomError::NoDocument)
        .and_then(|doc| doc.exec_command("copy").map_err(DomError::from));
    textarea.remove();

    match copied? {
        true => Ok(()),
        false => Err(DomError::Js("copy command was rejected".into())),
    }
}
