//! Client-side file download and upload.

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, HtmlAnchorElement, HtmlInputElement, Url};

use crate::dom;
use crate::error::DomError;

/// Save `href` (a data or object URL) under `file_name`.
pub fn download_url(file_name: &str, href: &str) -> Result<(), DomError> {
    let link: HtmlAnchorElement = dom::create("a")?;
    link.set_href(href);
    link.set_download(file_name);
    link.click();
    Ok(())
}

/// Save `content` as a file of type `mime`.
pub fn download_text(file_name: &str, mime: &str, content: &str) -> Result<(), DomError> {
    let parts = js_sys::Array::of1(&content.into());
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;

    let url = Url::create_object_url_with_blob(&blob)?;
    let result = download_url(file_name, &url);
    Url::revoke_object_url(&url)?;
    result
}

/// First selected file of a file input.
pub fn first_file(input: &HtmlInputElement) -> Option<File> {
    input.files()?.get(0)
}

pub async fn read_text(file: &File) -> Result<String, DomError> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| DomError::Js("file contents were not text".into()))
}

/// Open a file picker; `on_pick` receives the chosen file.
///
/// Nothing happens if the user cancels. The picker stays wired while the
/// returned listener is alive, so callers keep the latest one and drop the
/// previous.
pub fn pick_file(accept: &str, on_pick: impl FnOnce(File) + 'static) -> Result<EventListener, DomError> {
    let input: HtmlInputElement = dom::create("input")?;
    input.set_type("file");
    input.set_accept(accept);

    let target = input.clone();
    let listener = EventListener::once(&input, "change", move |_| {
        if let Some(file) = first_file(&target) {
            on_pick(file);
        }
    });

    input.click();
    Ok(listener)
}

/// Read the file chosen in `input` (if any) and hand its text to `on_text`.
pub fn read_selected(input: &HtmlInputElement, on_text: impl FnOnce(Result<String, DomError>) + 'static) {
    let Some(file) = first_file(input) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        on_text(read_text(&file).await);
    });
}

/// Element behind an event target, if it is a file input.
pub fn as_file_input(target: Option<web_sys::EventTarget>) -> Option<HtmlInputElement> {
    target?.dyn_into().ok()
}
