//! Single-document editor state: font scale and initial source.

use crate::codec::decode_base64;
use crate::params::QueryParams;
use crate::render::RenderOptions;

/// Preview font size at 100%.
pub const BASE_FONT_PX: f32 = 16.0;
pub const MIN_FONT_PERCENT: u16 = 50;
pub const MAX_FONT_PERCENT: u16 = 200;
pub const FONT_PERCENT_STEP: u16 = 10;
pub const DEFAULT_FONT_PERCENT: u16 = 100;

/// Shown when the page URL carries no document.
pub const DEFAULT_SAMPLE: &str = r"The quadratic formula is $x = \frac{-b \pm \sqrt{b^2-4ac}}{2a}$ and Einstein's famous equation is $E=mc^2$. For calculus, we have $\int_0^\infty e^{-x^2}dx = \frac{\sqrt{\pi}}{2}$.";

/// Preview zoom as a percentage of [`BASE_FONT_PX`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontScale(u16);

impl Default for FontScale {
    fn default() -> Self {
        Self(DEFAULT_FONT_PERCENT)
    }
}

impl FontScale {
    /// Clamped to the supported range.
    pub fn new(percent: u16) -> Self {
        Self(percent.clamp(MIN_FONT_PERCENT, MAX_FONT_PERCENT))
    }

    pub fn percent(self) -> u16 {
        self.0
    }

    pub fn zoom_in(&mut self) -> u16 {
        self.0 = (self.0 + FONT_PERCENT_STEP).min(MAX_FONT_PERCENT);
        self.0
    }

    pub fn zoom_out(&mut self) -> u16 {
        self.0 = self.0.saturating_sub(FONT_PERCENT_STEP).max(MIN_FONT_PERCENT);
        self.0
    }

    pub fn px(self) -> f32 {
        f32::from(self.0) / 100.0 * BASE_FONT_PX
    }

    /// Text for the zoom indicator, e.g. `110%`.
    pub fn label(self) -> String {
        format!("{}%", self.0)
    }

    pub fn render_options(self) -> RenderOptions {
        RenderOptions::with_font_size(self.px())
    }
}

/// Where the editor's first document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialSource {
    /// Decoded from the `base64` parameter.
    Inline(String),
    /// Fetched from the `url` parameter; fall back to the sample on failure.
    Remote(String),
    Sample,
}

impl InitialSource {
    /// `base64` wins when it decodes to non-empty text, then `url`, then the
    /// sample document.
    pub fn from_params(params: &QueryParams) -> Self {
        if let Some(encoded) = params.get_nonempty("base64") {
            match decode_base64(encoded) {
                Ok(text) if !text.is_empty() => return InitialSource::Inline(text),
                Ok(_) => {}
                Err(e) => tracing::warn!("ignoring base64 parameter: {e}"),
            }
        }
        if let Some(url) = params.get_nonempty("url") {
            return InitialSource::Remote(url.to_string());
        }
        InitialSource::Sample
    }
}

/// Text after a quick-tool button appends `snippet`.
pub fn append_snippet(text: &str, snippet: &str) -> String {
    format!("{text} {snippet} ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_scale_bounds() {
        let mut scale = FontScale::default();
        assert_eq!(scale.px(), 16.0);
        assert_eq!(scale.label(), "100%");

        for _ in 0..20 {
            scale.zoom_in();
        }
        assert_eq!(scale.percent(), 200);
        assert_eq!(scale.px(), 32.0);

        for _ in 0..20 {
            scale.zoom_out();
        }
        assert_eq!(scale.percent(), 50);
        assert_eq!(scale.px(), 8.0);

        assert_eq!(FontScale::new(7).percent(), 50);
        assert_eq!(FontScale::new(110).render_options().font_size_px, Some(17.6));
    }

    #[test]
    fn test_initial_source_priority() {
        let src = InitialSource::from_params(&QueryParams::parse("base64=eA&url=http%3A%2F%2Fa"));
        assert_eq!(src, InitialSource::Inline("x".into()));

        // Bad or empty payloads fall through to the url.
        let src = InitialSource::from_params(&QueryParams::parse("base64=%40&url=http%3A%2F%2Fa"));
        assert_eq!(src, InitialSource::Remote("http://a".into()));

        assert_eq!(
            InitialSource::from_params(&QueryParams::parse("mode=editor")),
            InitialSource::Sample
        );
    }

    #[test]
    fn test_append_snippet() {
        assert_eq!(append_snippet("a", r"\alpha"), r"a \alpha ");
        assert_eq!(append_snippet("", "x"), " x ");
    }
}
