//! Page URL access: query parameters, history and new tabs.

use texreader_core::QueryParams;
use wasm_bindgen::JsValue;

use crate::dom::window;
use crate::error::DomError;

/// Query parameters of the current page. Empty when unavailable.
pub fn url_params() -> QueryParams {
    window()
        .and_then(|w| w.location().search().map_err(DomError::from))
        .map(|search| QueryParams::parse(&search))
        .unwrap_or_default()
}

/// Set one query parameter and push the new URL onto the history stack.
pub fn set_url_param(key: &str, value: &str) -> Result<(), DomError> {
    let window = window()?;
    let location = window.location();
    let mut params = QueryParams::parse(&location.search()?);
    params.set(key, value);

    let url = format!(
        "{}?{}{}",
        location.pathname()?,
        params.to_query_string(),
        location.hash()?
    );
    window
        .history()?
        .push_state_with_url(&JsValue::NULL, "", Some(&url))?;
    Ok(())
}

/// `origin + pathname` of the current page, the base of share links.
pub fn page_base_url() -> Result<String, DomError> {
    let location = window()?.location();
    Ok(format!("{}{}", location.origin()?, location.pathname()?))
}

/// Resolve `url` against the current page, so relative links work.
pub fn absolute_url(url: &str) -> Result<String, DomError> {
    let base = window()?.location().href()?;
    Ok(web_sys::Url::new_with_base(url, &base)?.href())
}

pub fn open_in_new_tab(url: &str) -> Result<(), DomError> {
    window()?.open_with_url_and_target(url, "_blank")?;
    Ok(())
}
