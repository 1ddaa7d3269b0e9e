//! Embeddable quote view: LaTeX passed in through the page URL.

use crate::codec::{decode_base64_or_empty, encode_base64};
use crate::mode::AppMode;
use crate::params::QueryParams;
use crate::render::{Align, RenderOptions};

/// What the quote view should show, read from the page's query string.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteRequest {
    /// Decoded `base64` payload, rendered immediately.
    pub inline: Option<String>,
    /// `url` to fetch; its text replaces the inline rendering when it arrives.
    pub remote: Option<String>,
    pub options: RenderOptions,
    /// `ui=none`: strip the page chrome and show only the rendering.
    pub hide_ui: bool,
}

impl QuoteRequest {
    /// `None` when the URL carries no content at all.
    pub fn from_params(params: &QueryParams) -> Option<Self> {
        let inline = params.get_nonempty("base64").map(decode_base64_or_empty);
        let remote = params.get_nonempty("url").map(str::to_string);
        if inline.is_none() && remote.is_none() {
            return None;
        }

        let options = RenderOptions {
            font_size_px: params
                .get_nonempty("fontsize")
                .and_then(parse_leading_int)
                .filter(|&px| px > 0)
                .map(|px| px as f32),
            align: params.get("align").and_then(|a| a.parse::<Align>().ok()),
        };

        Some(Self {
            inline,
            remote,
            options,
            hide_ui: params.get("ui") == Some("none"),
        })
    }
}

/// Leading decimal integer of `s`, after optional whitespace and sign.
///
/// `"18px"` gives 18, `"px"` gives `None`.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Shareable link that opens `latex` in the quote view of the page at `base`.
pub fn share_url(base: &str, latex: &str) -> String {
    share_url_for_encoded(base, &encode_base64(latex))
}

/// Shareable link for an already-encoded payload.
pub fn share_url_for_encoded(base: &str, encoded: &str) -> String {
    let mut params = QueryParams::new();
    params.append("mode", AppMode::Quote.as_str());
    params.append("base64", encoded);
    crate::params::with_query(base, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_base64;

    #[test]
    fn test_no_content() {
        assert_eq!(QuoteRequest::from_params(&QueryParams::parse("mode=quote&ui=none")), None);
        assert_eq!(QuoteRequest::from_params(&QueryParams::parse("base64=&url=")), None);
    }

    #[test]
    fn test_inline_with_options() {
        let params = QueryParams::parse("mode=quote&base64=JEU9bWNeMiQ=&fontsize=24px&align=center&ui=none");
        let req = QuoteRequest::from_params(&params).unwrap();
        assert_eq!(req.inline.as_deref(), Some("$E=mc^2$"));
        assert_eq!(req.remote, None);
        assert_eq!(req.options.font_size_px, Some(24.0));
        assert_eq!(req.options.align, Some(Align::Center));
        assert!(req.hide_ui);
    }

    #[test]
    fn test_bad_options_ignored() {
        let params = QueryParams::parse("url=https%3A%2F%2Fa.b%2Fc.tex&fontsize=big&align=justify");
        let req = QuoteRequest::from_params(&params).unwrap();
        assert_eq!(req.inline, None);
        assert_eq!(req.remote.as_deref(), Some("https://a.b/c.tex"));
        assert_eq!(req.options, RenderOptions::default());
        assert!(!req.hide_ui);

        let params = QueryParams::parse("base64=eA&fontsize=0");
        let req = QuoteRequest::from_params(&params).unwrap();
        assert_eq!(req.options.font_size_px, None);
    }

    #[test]
    fn test_undecodable_inline_renders_empty() {
        let req = QuoteRequest::from_params(&QueryParams::parse("base64=%40%40")).unwrap();
        assert_eq!(req.inline.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("18"), Some(18));
        assert_eq!(parse_leading_int(" 18.5px"), Some(18));
        assert_eq!(parse_leading_int("-4"), Some(-4));
        assert_eq!(parse_leading_int("px"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_share_url_round_trip() {
        let url = share_url("https://reader.example/", r"a+b \over c");
        assert!(url.starts_with("https://reader.example/?mode=quote&base64="));

        let query = url.split_once('?').unwrap().1;
        let params = QueryParams::parse(query);
        assert_eq!(params.get("mode"), Some("quote"));
        let decoded = decode_base64(params.get("base64").unwrap()).unwrap();
        assert_eq!(decoded, r"a+b \over c");
    }
}
