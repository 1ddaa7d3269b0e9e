//! Fetching remote LaTeX sources.

use crate::error::DomError;
use crate::location::absolute_url;

/// GET `url` (relative to the page) and return its body as text.
pub async fn fetch_text(url: &str) -> Result<String, DomError> {
    let url = absolute_url(url)?;
    tracing::debug!("fetching {url}");
    let response = reqwest::get(&url).await?.error_for_status()?;
    Ok(response.text().await?)
}
