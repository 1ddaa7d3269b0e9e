//! Rendering seam between texreader state and the LaTeX-to-HTML library.
//!
//! Core never renders anything itself. Each platform supplies a
//! [`LatexRenderer`] and the mode controllers call [`render_into`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Horizontal alignment of rendered output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }

    /// CSS class applied to the render target.
    pub fn css_class(self) -> &'static str {
        match self {
            Align::Left => "align-left",
            Align::Center => "align-center",
            Align::Right => "align-right",
        }
    }
}

impl FromStr for Align {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "center" => Ok(Align::Center),
            "right" => Ok(Align::Right),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation options for one render call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderOptions {
    pub font_size_px: Option<f32>,
    pub align: Option<Align>,
}

impl RenderOptions {
    pub fn with_font_size(font_size_px: f32) -> Self {
        Self {
            font_size_px: Some(font_size_px),
            align: None,
        }
    }
}

/// Platform renderer for LaTeX source.
pub trait LatexRenderer {
    /// Where rendered output goes (a DOM element in the browser).
    type Target: ?Sized;
    type Error: fmt::Display;

    /// Replace the target's contents with the rendering of `source`.
    fn render(
        &self,
        source: &str,
        target: &Self::Target,
        options: &RenderOptions,
    ) -> Result<(), Self::Error>;

    /// Replace the target's contents with an error message.
    fn show_error(&self, target: &Self::Target, message: &str);
}

/// Render `source` into `target`, reporting failures inside the target.
///
/// Returns `true` when rendering succeeded.
pub fn render_into<R: LatexRenderer>(
    renderer: &R,
    source: &str,
    target: &R::Target,
    options: &RenderOptions,
) -> bool {
    match renderer.render(source, target, options) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("LaTeX render failed: {e}");
            renderer.show_error(target, &format!("Render error: {e}"));
            false
        }
    }
}
